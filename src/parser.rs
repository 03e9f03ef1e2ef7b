//! Terminal log extraction for compression runs
//!
//! Scans pipeline output line by line and emits one [`CompressionRecord`]
//! per compression event. Supports:
//! - File progress markers: `[3/40] Processing: ...`
//! - Phase markers for article and social prompt generation
//! - Compression pairs: `Compressing prompt (~22493 tokens)` followed on the
//!   next line by `Compressed to 14701 tokens (34.6% savings)`
//! - Per-file totals: `Tokens: 23908 → 15616 (34.7% savings)`, attached to
//!   an already-emitted record, never a new observation

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::record::{Category, CompressionRecord, FileTotals};

/// Errors for log extraction
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed numeric field `{fragment}` on line {line}")]
    MalformedNumber { fragment: String, line: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Scan context carried from line to line
///
/// File index and category persist until the next marker updates them. The
/// pending original size is live for exactly one following line: a result
/// marker anywhere else produces no observation.
#[derive(Debug, Clone, Default)]
struct ScanState {
    current_file: Option<u32>,
    category: Category,
    pending_original: Option<u64>,
}

/// Line-oriented parser for compression run logs
#[derive(Debug)]
pub struct LogParser {
    file_marker: Regex,
    compress_marker: Regex,
    result_marker: Regex,
    totals_marker: Regex,
}

impl LogParser {
    pub fn new() -> Self {
        Self {
            file_marker: Regex::new(r"\[(\d+)/\d+\] Processing:").expect("fixed pattern"),
            compress_marker: Regex::new(r"Compressing prompt \(~(\d+) tokens\)")
                .expect("fixed pattern"),
            result_marker: Regex::new(r"Compressed to (\d+) tokens \(([\d.]+)% savings\)")
                .expect("fixed pattern"),
            totals_marker: Regex::new(r"Tokens: (\d+) → (\d+) \(([\d.]+)% savings\)")
                .expect("fixed pattern"),
        }
    }

    /// Extract all compression records from log text
    ///
    /// Fails on the first malformed numeric capture; no partial output.
    pub fn parse(&self, text: &str) -> Result<Vec<CompressionRecord>> {
        let mut state = ScanState::default();
        let mut records = Vec::new();

        for (index, line) in text.lines().enumerate() {
            self.step(&mut state, index + 1, line, &mut records)?;
        }

        debug!(records = records.len(), "log scan complete");
        Ok(records)
    }

    /// Process one line, updating the scan state and emitting at most one record
    fn step(
        &self,
        state: &mut ScanState,
        line_no: usize,
        line: &str,
        records: &mut Vec<CompressionRecord>,
    ) -> Result<()> {
        // The pending original size only survives into this line.
        let pending = state.pending_original.take();

        if let Some(caps) = self.file_marker.captures(line) {
            state.current_file = Some(parse_num(&caps[1], line_no)?);
            return Ok(());
        }

        if line.contains("Phase 1: Generating article") || line.contains("Building article prompt")
        {
            state.category = Category::Article;
        } else if line.contains("Building social media prompts") {
            state.category = Category::Social;
        }

        if let Some(caps) = self.result_marker.captures(line) {
            // A result with no pending original or no file context is noise.
            if let (Some(original), Some(file)) = (pending, state.current_file) {
                let compressed = parse_num(&caps[1], line_no)?;
                let savings = parse_float(&caps[2], line_no)?;
                records.push(CompressionRecord::new(
                    file,
                    state.category,
                    original,
                    compressed,
                    savings,
                ));
            }
            return Ok(());
        }

        if let Some(caps) = self.compress_marker.captures(line) {
            state.pending_original = Some(parse_num(&caps[1], line_no)?);
            return Ok(());
        }

        if let Some(caps) = self.totals_marker.captures(line) {
            if let Some(file) = state.current_file {
                let totals = FileTotals {
                    original: parse_num(&caps[1], line_no)?,
                    compressed: parse_num(&caps[2], line_no)?,
                    savings_percent: parse_float(&caps[3], line_no)?,
                };
                // Totals annotate the first record of the current file and
                // are never overwritten.
                if let Some(record) = records.iter_mut().find(|r| r.file_index == file) {
                    if record.totals.is_none() {
                        record.totals = Some(totals);
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_num<T: std::str::FromStr>(fragment: &str, line: usize) -> Result<T> {
    fragment
        .parse()
        .map_err(|_| ParseError::MalformedNumber {
            fragment: fragment.to_string(),
            line,
        })
}

fn parse_float(fragment: &str, line: usize) -> Result<f32> {
    // `[\d.]+` admits shapes like `1.2.3` that are not numbers.
    parse_num(fragment, line)
}
