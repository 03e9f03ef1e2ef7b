//! Compression observation data model and record sources
//!
//! A [`CompressionRecord`] is one measured compression event. Records reach
//! the analyzer through the [`RecordSource`] trait, which has two
//! implementations: the built-in tabulated dataset and a terminal-log parser
//! backed source. Both feed the identical aggregation pipeline.

use std::fmt;

use crate::parser::{LogParser, Result};

/// Pipeline phase that produced a compression observation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Article generation prompt
    Article,
    /// Social media prompt
    Social,
    /// Observed before any phase marker in the log
    #[default]
    Unknown,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Article => write!(f, "article"),
            Category::Social => write!(f, "social"),
            Category::Unknown => write!(f, "unknown"),
        }
    }
}

/// Per-file token totals reported once per processed file
///
/// Totals are a side-channel annotation: they attach to an existing record
/// and never create a new observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileTotals {
    pub original: u64,
    pub compressed: u64,
    pub savings_percent: f32,
}

/// One measured compression event
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionRecord {
    /// 1-based position of the file in the run; repeats across categories
    pub file_index: u32,
    pub category: Category,
    /// Prompt size before compression (tokens)
    pub original_tokens: u64,
    /// Prompt size after compression (tokens)
    pub compressed_tokens: u64,
    pub savings_percent: f32,
    /// compressed / original; always derived, never taken from input
    pub ratio: f32,
    /// Whole-file totals, set at most once by the log totals marker
    pub totals: Option<FileTotals>,
}

impl CompressionRecord {
    /// Build a record, deriving the compression ratio from the token counts
    pub fn new(
        file_index: u32,
        category: Category,
        original_tokens: u64,
        compressed_tokens: u64,
        savings_percent: f32,
    ) -> Self {
        Self {
            file_index,
            category,
            original_tokens,
            compressed_tokens,
            savings_percent,
            ratio: compressed_tokens as f32 / original_tokens as f32,
            totals: None,
        }
    }
}

/// Anything that can produce an ordered sequence of compression records
///
/// Keeps ingestion pluggable: the aggregator and formatter never know
/// whether records came from a parsed log or the tabulated dataset.
pub trait RecordSource {
    fn records(&self) -> Result<Vec<CompressionRecord>>;
}

/// Terminal log text as a record source
#[derive(Debug)]
pub struct LogSource {
    text: String,
}

impl LogSource {
    pub fn new(text: String) -> Self {
        Self { text }
    }
}

impl RecordSource for LogSource {
    fn records(&self) -> Result<Vec<CompressionRecord>> {
        LogParser::new().parse(&self.text)
    }
}

/// The tabulated dataset from a full 40-file production run
///
/// Used when no log file is supplied, and as a stable corpus for tests and
/// benches. Ratios are recomputed from the token counts on load.
#[derive(Debug, Default)]
pub struct BuiltinDataset;

/// (file index, category, original tokens, compressed tokens, savings %)
const BUILTIN_RUN: &[(u32, Category, u64, u64, f32)] = &[
    // Article prompts
    (1, Category::Article, 22493, 14701, 34.6),
    (2, Category::Article, 16209, 10308, 36.4),
    (3, Category::Article, 10750, 6885, 36.0),
    (4, Category::Article, 23045, 13528, 41.3),
    (5, Category::Article, 15694, 10139, 35.4),
    (6, Category::Article, 36159, 22616, 37.5),
    (7, Category::Article, 12486, 8452, 32.3),
    (8, Category::Article, 35703, 18419, 48.4),
    (9, Category::Article, 15516, 10154, 34.6),
    (10, Category::Article, 27611, 18173, 34.2),
    (11, Category::Article, 27073, 18016, 33.5),
    (12, Category::Article, 14140, 9003, 36.3),
    (13, Category::Article, 29642, 18877, 36.3),
    (14, Category::Article, 18345, 11843, 35.4),
    (15, Category::Article, 18228, 12097, 33.6),
    (16, Category::Article, 18804, 11689, 37.8),
    (17, Category::Article, 32794, 20867, 36.4),
    (18, Category::Article, 25953, 16999, 34.5),
    (19, Category::Article, 47983, 30336, 36.8),
    (20, Category::Article, 23381, 15468, 33.8),
    (21, Category::Article, 11928, 7741, 35.1),
    (22, Category::Article, 9668, 6104, 36.9),
    (23, Category::Article, 18990, 12066, 36.5),
    (24, Category::Article, 20376, 12797, 37.2),
    (25, Category::Article, 11022, 7266, 34.1),
    (26, Category::Article, 16620, 10375, 37.6),
    (27, Category::Article, 17085, 10664, 37.6),
    (28, Category::Article, 12112, 7894, 34.8),
    (29, Category::Article, 27805, 18229, 34.4),
    (30, Category::Article, 11094, 7263, 34.5),
    (31, Category::Article, 18096, 11033, 39.0),
    (32, Category::Article, 14196, 9189, 35.3),
    (33, Category::Article, 28887, 17344, 40.0),
    (34, Category::Article, 11015, 6985, 36.6),
    (35, Category::Article, 21328, 13258, 37.8),
    (36, Category::Article, 15779, 9538, 39.6),
    (37, Category::Article, 6329, 4016, 36.5),
    (38, Category::Article, 17510, 11388, 35.0),
    (39, Category::Article, 17249, 11795, 31.6),
    (40, Category::Article, 21953, 14156, 35.5),
    // Social prompts
    (1, Category::Social, 1415, 915, 35.3),
    (2, Category::Social, 1477, 882, 40.3),
    (3, Category::Social, 1393, 884, 36.6),
    (4, Category::Social, 1378, 856, 37.9),
    (5, Category::Social, 1620, 1045, 35.5),
    (6, Category::Social, 1460, 870, 40.4),
    (7, Category::Social, 1259, 767, 39.1),
    (8, Category::Social, 1568, 1027, 34.5),
    (9, Category::Social, 1471, 913, 38.0),
    (10, Category::Social, 1507, 984, 34.7),
    (11, Category::Social, 1331, 870, 34.6),
    (12, Category::Social, 1426, 858, 39.9),
    (13, Category::Social, 1297, 796, 38.6),
    (14, Category::Social, 1250, 758, 39.4),
    (15, Category::Social, 1496, 989, 33.9),
    (16, Category::Social, 1417, 872, 38.5),
    (17, Category::Social, 1521, 966, 36.5),
    (18, Category::Social, 1395, 919, 34.2),
    (19, Category::Social, 1490, 928, 37.8),
    (20, Category::Social, 1503, 1029, 31.5),
    (21, Category::Social, 1584, 1066, 32.7),
    (22, Category::Social, 1390, 887, 36.2),
    (23, Category::Social, 1461, 921, 37.0),
    (24, Category::Social, 1330, 824, 38.0),
    (25, Category::Social, 1578, 991, 37.2),
    (26, Category::Social, 1421, 927, 34.8),
    (27, Category::Social, 1465, 955, 34.9),
    (28, Category::Social, 1369, 824, 39.9),
    (29, Category::Social, 1617, 1101, 32.0),
    (30, Category::Social, 1397, 836, 40.2),
    (31, Category::Social, 1551, 967, 37.7),
    (32, Category::Social, 1418, 909, 35.9),
    (33, Category::Social, 1639, 1057, 35.5),
    (34, Category::Social, 1397, 883, 36.8),
    (35, Category::Social, 1394, 860, 38.4),
    (36, Category::Social, 1522, 989, 35.1),
    (37, Category::Social, 1342, 793, 40.9),
    (38, Category::Social, 1499, 963, 35.8),
    (39, Category::Social, 1516, 958, 36.8),
    (40, Category::Social, 1406, 896, 36.3),
];

impl RecordSource for BuiltinDataset {
    fn records(&self) -> Result<Vec<CompressionRecord>> {
        Ok(BUILTIN_RUN
            .iter()
            .map(|&(file, category, original, compressed, savings)| {
                CompressionRecord::new(file, category, original, compressed, savings)
            })
            .collect())
    }
}
