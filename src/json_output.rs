//! JSON output format for analysis results
//!
//! `--format json` emits the full aggregate structure for machine parsing
//! instead of the human-readable report.

use serde::{Deserialize, Serialize};

use crate::record::CompressionRecord;
use crate::stats::{Analysis, Bucket, CategoryStats, CorrelationStrength, Summary};

/// Sample counts for the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummaryCounts {
    pub total_samples: usize,
    pub article_samples: usize,
    pub social_samples: usize,
}

/// Distribution summary for one measured quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDistribution {
    pub mean: f32,
    pub median: f32,
    pub stdev: f32,
    pub min: f32,
    pub max: f32,
    pub range: f32,
}

impl From<&Summary> for JsonDistribution {
    fn from(summary: &Summary) -> Self {
        Self {
            mean: summary.mean,
            median: summary.median,
            stdev: summary.stdev,
            min: summary.min,
            max: summary.max,
            range: summary.range,
        }
    }
}

/// Savings summary for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCategory {
    pub mean_savings: f32,
    pub median_savings: f32,
    pub stdev_savings: f32,
    pub samples: usize,
}

impl From<&CategoryStats> for JsonCategory {
    fn from(stats: &CategoryStats) -> Self {
        Self {
            mean_savings: stats.savings.mean,
            median_savings: stats.savings.median,
            stdev_savings: stats.savings.stdev,
            samples: stats.samples,
        }
    }
}

/// One compression record, used for the extreme cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRecord {
    pub file: u32,
    pub category: String,
    pub original_tokens: u64,
    pub compressed_tokens: u64,
    pub savings_percent: f32,
    pub ratio: f32,
}

impl From<&CompressionRecord> for JsonRecord {
    fn from(record: &CompressionRecord) -> Self {
        Self {
            file: record.file_index,
            category: record.category.to_string(),
            original_tokens: record.original_tokens,
            compressed_tokens: record.compressed_tokens,
            savings_percent: record.savings_percent,
            ratio: record.ratio,
        }
    }
}

/// Correlation coefficient with its narrative classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCorrelation {
    pub coefficient: f64,
    pub strength: String,
    pub direction: String,
}

/// First-half vs second-half savings comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonProcessingOrder {
    pub first_half_mean: f32,
    pub second_half_mean: f32,
    pub difference: f32,
    pub first_samples: usize,
    pub second_samples: usize,
}

/// Mean savings for one file index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFileMean {
    pub file: u32,
    pub mean_savings: f32,
}

/// Records on one side of a savings threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBucket {
    pub threshold: f32,
    pub count: usize,
    pub share_percent: f32,
    /// Absent when the bucket is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<JsonBucketDetail>,
}

/// Composition of a non-empty bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBucketDetail {
    pub mean_original_tokens: f32,
    pub article_count: usize,
    pub social_count: usize,
}

impl From<&Bucket> for JsonBucket {
    fn from(bucket: &Bucket) -> Self {
        Self {
            threshold: bucket.threshold,
            count: bucket.count,
            share_percent: bucket.share_percent,
            detail: bucket.detail.as_ref().map(|d| JsonBucketDetail {
                mean_original_tokens: d.mean_original_tokens,
                article_count: d.article_count,
                social_count: d.social_count,
            }),
        }
    }
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub summary: JsonSummaryCounts,
    pub savings: JsonDistribution,
    pub compression_ratio: JsonDistribution,
    pub original_tokens: JsonDistribution,
    pub article: JsonCategory,
    pub social: JsonCategory,
    pub max_savings: JsonRecord,
    pub min_savings: JsonRecord,
    pub correlation: JsonCorrelation,
    pub processing_order: JsonProcessingOrder,
    pub file_means: Vec<JsonFileMean>,
    pub high_compression: JsonBucket,
    pub low_compression: JsonBucket,
}

impl JsonReport {
    /// Build the JSON mirror of an analysis
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let r = analysis.size_savings_correlation;
        let direction = if r > 0.0 {
            "positive"
        } else if r < 0.0 {
            "negative"
        } else {
            "none"
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "resumen-json-v1".to_string(),
            summary: JsonSummaryCounts {
                total_samples: analysis.total_samples,
                article_samples: analysis.article_samples,
                social_samples: analysis.social_samples,
            },
            savings: JsonDistribution::from(&analysis.savings),
            compression_ratio: JsonDistribution::from(&analysis.ratio),
            original_tokens: JsonDistribution::from(&analysis.original_tokens),
            article: JsonCategory::from(&analysis.article),
            social: JsonCategory::from(&analysis.social),
            max_savings: JsonRecord::from(&analysis.max_savings),
            min_savings: JsonRecord::from(&analysis.min_savings),
            correlation: JsonCorrelation {
                coefficient: r,
                strength: CorrelationStrength::classify(r).label().to_string(),
                direction: direction.to_string(),
            },
            processing_order: JsonProcessingOrder {
                first_half_mean: analysis.drift.first_half_mean,
                second_half_mean: analysis.drift.second_half_mean,
                difference: analysis.drift.difference,
                first_samples: analysis.drift.first_samples,
                second_samples: analysis.drift.second_samples,
            },
            file_means: analysis
                .file_means
                .iter()
                .map(|f| JsonFileMean {
                    file: f.file_index,
                    mean_savings: f.mean_savings,
                })
                .collect(),
            high_compression: JsonBucket::from(&analysis.high_bucket),
            low_compression: JsonBucket::from(&analysis.low_bucket),
        }
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
