//! Statistics aggregation over compression records
//!
//! Turns an ordered sequence of [`CompressionRecord`]s into an [`Analysis`]:
//! distribution summaries, per-category breakdowns, extremes, Pearson
//! correlation, positional drift, per-file means and savings buckets. Every
//! derived field is a pure function of the input sequence; the same records
//! always produce the same analysis.
//!
//! Basic kernels (mean, stddev, min, max) run through Trueno for SIMD
//! acceleration. Medians and correlations are computed directly since Trueno
//! has no percentile or covariance primitives.

use std::collections::HashMap;

use crate::record::{Category, CompressionRecord};

/// Savings percentage above which a sample counts as high compression
pub const HIGH_SAVINGS_THRESHOLD: f32 = 40.0;

/// Savings percentage below which a sample counts as low compression
pub const LOW_SAVINGS_THRESHOLD: f32 = 32.5;

/// Drift in percentage points separating a first/second-half trend from noise
pub const DRIFT_THRESHOLD_POINTS: f32 = 1.0;

/// Tunable analysis thresholds
///
/// The defaults are the values the report thresholds were originally
/// calibrated against; they are ordinary knobs, not semantics.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub high_savings_threshold: f32,
    pub low_savings_threshold: f32,
    pub drift_threshold_points: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            high_savings_threshold: HIGH_SAVINGS_THRESHOLD,
            low_savings_threshold: LOW_SAVINGS_THRESHOLD,
            drift_threshold_points: DRIFT_THRESHOLD_POINTS,
        }
    }
}

/// Distribution summary for one measured quantity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub mean: f32,
    pub median: f32,
    pub stdev: f32,
    pub min: f32,
    pub max: f32,
    pub range: f32,
}

impl Summary {
    /// Summarize a value sequence; empty input yields all zeros
    pub fn from_values(values: &[f32]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let v = trueno::Vector::from_slice(values);
        let mean = v.mean().unwrap_or(0.0);
        // Spread of a single observation is defined as 0, not an error.
        let stdev = if values.len() > 1 {
            v.stddev().unwrap_or(0.0)
        } else {
            0.0
        };
        let min = v.min().unwrap_or(0.0);
        let max = v.max().unwrap_or(0.0);

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = percentile(&sorted, 50.0);

        Self {
            mean,
            median,
            stdev,
            min,
            max,
            range: max - min,
        }
    }
}

/// Savings summary for one category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryStats {
    pub savings: Summary,
    pub samples: usize,
}

impl CategoryStats {
    fn from_savings(values: &[f32]) -> Self {
        Self {
            savings: Summary::from_values(values),
            samples: values.len(),
        }
    }
}

/// Mean savings of the first vs second half of the run, by input order
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalDrift {
    pub first_half_mean: f32,
    pub second_half_mean: f32,
    /// second half minus first half; 0 when either half is empty
    pub difference: f32,
    pub first_samples: usize,
    pub second_samples: usize,
}

/// Mean savings across all categories sharing a file index
#[derive(Debug, Clone, PartialEq)]
pub struct FileMeanSavings {
    pub file_index: u32,
    pub mean_savings: f32,
}

/// Records on one side of a savings threshold
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub threshold: f32,
    pub count: usize,
    pub share_percent: f32,
    pub detail: Option<BucketDetail>,
}

/// Composition of a non-empty bucket
#[derive(Debug, Clone, PartialEq)]
pub struct BucketDetail {
    pub mean_original_tokens: f32,
    pub article_count: usize,
    pub social_count: usize,
}

/// Narrative strength class for a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Negligible,
}

impl CorrelationStrength {
    /// |r| > 0.7 is strong, 0.3 < |r| <= 0.7 moderate, the rest negligible
    pub fn classify(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude > 0.7 {
            Self::Strong
        } else if magnitude > 0.3 {
            Self::Moderate
        } else {
            Self::Negligible
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Negligible => "negligible",
        }
    }
}

/// Narrative verdict for first/second-half savings drift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftVerdict {
    Better,
    Worse,
    Consistent,
}

impl DriftVerdict {
    /// Differences within the threshold are reported as consistent
    pub fn classify(difference: f32, threshold: f32) -> Self {
        if difference.abs() > threshold {
            if difference > 0.0 {
                Self::Better
            } else {
                Self::Worse
            }
        } else {
            Self::Consistent
        }
    }
}

/// Aggregate statistics over one run
///
/// Produced by [`analyze`]; read-only input to the report formatter and the
/// JSON export.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub total_samples: usize,
    pub article_samples: usize,
    pub social_samples: usize,
    pub savings: Summary,
    pub ratio: Summary,
    pub original_tokens: Summary,
    pub article: CategoryStats,
    pub social: CategoryStats,
    /// Record with the highest savings; first occurrence wins ties
    pub max_savings: CompressionRecord,
    /// Record with the lowest savings; first occurrence wins ties
    pub min_savings: CompressionRecord,
    /// Pearson r between original token count and savings percent
    pub size_savings_correlation: f64,
    pub drift: PositionalDrift,
    /// Per-file mean savings, descending; ties keep first-appearance order
    pub file_means: Vec<FileMeanSavings>,
    pub high_bucket: Bucket,
    pub low_bucket: Bucket,
}

/// Aggregate a record sequence; `None` when there is nothing to analyze
pub fn analyze(records: &[CompressionRecord], config: &AnalysisConfig) -> Option<Analysis> {
    if records.is_empty() {
        return None;
    }

    let savings_all: Vec<f32> = records.iter().map(|r| r.savings_percent).collect();
    let ratio_all: Vec<f32> = records.iter().map(|r| r.ratio).collect();
    let original_all: Vec<f32> = records.iter().map(|r| r.original_tokens as f32).collect();

    let article_savings = savings_of(records, Category::Article);
    let social_savings = savings_of(records, Category::Social);

    // Linear scan keeps the first occurrence on ties.
    let mut max_savings = &records[0];
    let mut min_savings = &records[0];
    for record in &records[1..] {
        if record.savings_percent > max_savings.savings_percent {
            max_savings = record;
        }
        if record.savings_percent < min_savings.savings_percent {
            min_savings = record;
        }
    }

    let sizes: Vec<f64> = records.iter().map(|r| r.original_tokens as f64).collect();
    let savings: Vec<f64> = records.iter().map(|r| r.savings_percent as f64).collect();
    let size_savings_correlation = pearson_correlation(&sizes, &savings);

    // Structural split by input order, not by any sort key.
    let mid = records.len() / 2;
    let (first, second) = savings_all.split_at(mid);
    let first_half_mean = mean_of(first);
    let second_half_mean = mean_of(second);
    let drift = PositionalDrift {
        first_half_mean,
        second_half_mean,
        difference: if first.is_empty() || second.is_empty() {
            0.0
        } else {
            second_half_mean - first_half_mean
        },
        first_samples: first.len(),
        second_samples: second.len(),
    };

    Some(Analysis {
        total_samples: records.len(),
        article_samples: article_savings.len(),
        social_samples: social_savings.len(),
        savings: Summary::from_values(&savings_all),
        ratio: Summary::from_values(&ratio_all),
        original_tokens: Summary::from_values(&original_all),
        article: CategoryStats::from_savings(&article_savings),
        social: CategoryStats::from_savings(&social_savings),
        max_savings: max_savings.clone(),
        min_savings: min_savings.clone(),
        size_savings_correlation,
        drift,
        file_means: per_file_means(records),
        high_bucket: bucket(records, config.high_savings_threshold, |r| {
            r.savings_percent > config.high_savings_threshold
        }),
        low_bucket: bucket(records, config.low_savings_threshold, |r| {
            r.savings_percent < config.low_savings_threshold
        }),
    })
}

/// Pearson correlation coefficient
///
/// Degenerate inputs (length mismatch, fewer than two points, zero variance
/// on either axis) are defined as 0.0, never NaN.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    // A constant sequence has no variance. Checked up front: rounding in the
    // mean of repeated values must not manufacture a coefficient.
    if x.iter().all(|v| *v == x[0]) || y.iter().all(|v| *v == y[0]) {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Mean savings per file index, grouped across categories
///
/// Grouping deliberately ignores the category: a file index that appears in
/// both phases averages its article and social savings together. Result is
/// sorted descending by mean; the stable sort keeps first-appearance order
/// for ties.
fn per_file_means(records: &[CompressionRecord]) -> Vec<FileMeanSavings> {
    let mut order: Vec<u32> = Vec::new();
    let mut groups: HashMap<u32, Vec<f32>> = HashMap::new();
    for record in records {
        groups
            .entry(record.file_index)
            .or_insert_with(|| {
                order.push(record.file_index);
                Vec::new()
            })
            .push(record.savings_percent);
    }

    let mut means: Vec<FileMeanSavings> = order
        .iter()
        .map(|file_index| FileMeanSavings {
            file_index: *file_index,
            mean_savings: mean_of(&groups[file_index]),
        })
        .collect();
    means.sort_by(|a, b| {
        b.mean_savings
            .partial_cmp(&a.mean_savings)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    means
}

fn bucket<F>(records: &[CompressionRecord], threshold: f32, pred: F) -> Bucket
where
    F: Fn(&CompressionRecord) -> bool,
{
    let members: Vec<&CompressionRecord> = records.iter().filter(|r| pred(r)).collect();
    let detail = if members.is_empty() {
        None
    } else {
        let originals: Vec<f32> = members.iter().map(|r| r.original_tokens as f32).collect();
        Some(BucketDetail {
            mean_original_tokens: mean_of(&originals),
            article_count: members
                .iter()
                .filter(|r| r.category == Category::Article)
                .count(),
            social_count: members
                .iter()
                .filter(|r| r.category == Category::Social)
                .count(),
        })
    };

    Bucket {
        threshold,
        count: members.len(),
        share_percent: members.len() as f32 / records.len() as f32 * 100.0,
        detail,
    }
}

fn savings_of(records: &[CompressionRecord], category: Category) -> Vec<f32> {
    records
        .iter()
        .filter(|r| r.category == category)
        .map(|r| r.savings_percent)
        .collect()
}

fn mean_of(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    trueno::Vector::from_slice(values).mean().unwrap_or(0.0)
}

/// Interpolated percentile over sorted data
fn percentile(sorted_data: &[f32], percentile: f32) -> f32 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f32;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f32;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        file: u32,
        category: Category,
        original: u64,
        compressed: u64,
        savings: f32,
    ) -> CompressionRecord {
        CompressionRecord::new(file, category, original, compressed, savings)
    }

    #[test]
    fn test_summary_basic_values() {
        let summary = Summary::from_values(&[1.0, 2.0, 3.0, 4.0]);
        assert!((summary.mean - 2.5).abs() < 1e-4);
        assert!((summary.median - 2.5).abs() < 1e-4);
        assert!((summary.min - 1.0).abs() < 1e-6);
        assert!((summary.max - 4.0).abs() < 1e-6);
        assert!((summary.range - 3.0).abs() < 1e-6);
        assert!(summary.stdev > 0.0);
    }

    #[test]
    fn test_summary_odd_length_median() {
        let summary = Summary::from_values(&[5.0, 1.0, 3.0]);
        assert!((summary.median - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_summary_single_element_stdev_is_zero() {
        let summary = Summary::from_values(&[42.0]);
        assert_eq!(summary.stdev, 0.0);
        assert!((summary.mean - 42.0).abs() < 1e-6);
        assert_eq!(summary.range, 0.0);
    }

    #[test]
    fn test_summary_empty_is_zeroed() {
        assert_eq!(Summary::from_values(&[]), Summary::default());
    }

    #[test]
    fn test_correlation_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 20.0, 30.0, 40.0];
        assert!((pearson_correlation(&x, &y) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_perfect_negative() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson_correlation(&x, &y) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_zero_variance_is_zero() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(pearson_correlation(&x, &y), 0.0);
        assert_eq!(pearson_correlation(&y, &x), 0.0);
    }

    #[test]
    fn test_correlation_short_input_is_zero() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), 0.0);
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn test_correlation_is_symmetric() {
        let x = [12.0, 7.5, 30.1, 4.0, 19.9];
        let y = [3.3, 8.1, 2.2, 9.0, 5.5];
        let xy = pearson_correlation(&x, &y);
        let yx = pearson_correlation(&y, &x);
        assert!((xy - yx).abs() < 1e-12);
    }

    #[test]
    fn test_strength_classification_boundaries() {
        assert_eq!(
            CorrelationStrength::classify(0.71),
            CorrelationStrength::Strong
        );
        assert_eq!(
            CorrelationStrength::classify(-0.9),
            CorrelationStrength::Strong
        );
        assert_eq!(
            CorrelationStrength::classify(0.7),
            CorrelationStrength::Moderate
        );
        assert_eq!(
            CorrelationStrength::classify(-0.5),
            CorrelationStrength::Moderate
        );
        assert_eq!(
            CorrelationStrength::classify(0.3),
            CorrelationStrength::Negligible
        );
        assert_eq!(
            CorrelationStrength::classify(0.0),
            CorrelationStrength::Negligible
        );
    }

    #[test]
    fn test_drift_classification() {
        assert_eq!(DriftVerdict::classify(1.5, 1.0), DriftVerdict::Better);
        assert_eq!(DriftVerdict::classify(-1.5, 1.0), DriftVerdict::Worse);
        assert_eq!(DriftVerdict::classify(0.5, 1.0), DriftVerdict::Consistent);
        // The threshold itself is still consistent.
        assert_eq!(DriftVerdict::classify(1.0, 1.0), DriftVerdict::Consistent);
        assert_eq!(DriftVerdict::classify(-1.0, 1.0), DriftVerdict::Consistent);
    }

    #[test]
    fn test_analyze_empty_returns_none() {
        assert!(analyze(&[], &AnalysisConfig::default()).is_none());
    }

    #[test]
    fn test_analyze_two_record_run() {
        let records = vec![
            record(1, Category::Article, 22493, 14701, 34.6),
            record(2, Category::Article, 16209, 10308, 36.4),
        ];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.total_samples, 2);
        assert_eq!(analysis.article_samples, 2);
        assert_eq!(analysis.social_samples, 0);
        assert!((analysis.savings.mean - 35.5).abs() < 1e-3);
        assert!(analysis.savings.stdev > 0.0);
        assert_eq!(analysis.max_savings.file_index, 2);
        assert_eq!(analysis.min_savings.file_index, 1);
    }

    #[test]
    fn test_extremes_are_stable_on_ties() {
        let records = vec![
            record(1, Category::Article, 1000, 600, 40.0),
            record(2, Category::Social, 1000, 600, 40.0),
            record(3, Category::Article, 1000, 700, 30.0),
            record(4, Category::Social, 1000, 700, 30.0),
        ];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.max_savings.file_index, 1);
        assert_eq!(analysis.min_savings.file_index, 3);
    }

    #[test]
    fn test_per_file_mean_crosses_categories() {
        let records = vec![
            record(1, Category::Article, 1000, 500, 50.0),
            record(1, Category::Social, 1000, 700, 30.0),
        ];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.file_means.len(), 1);
        assert_eq!(analysis.file_means[0].file_index, 1);
        assert!((analysis.file_means[0].mean_savings - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_file_means_sorted_descending() {
        let records = vec![
            record(1, Category::Article, 1000, 700, 30.0),
            record(2, Category::Article, 1000, 500, 50.0),
            record(3, Category::Article, 1000, 600, 40.0),
        ];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
        let indices: Vec<u32> = analysis.file_means.iter().map(|f| f.file_index).collect();
        assert_eq!(indices, vec![2, 3, 1]);
    }

    #[test]
    fn test_positional_split_uses_input_order() {
        let records = vec![
            record(1, Category::Article, 1000, 900, 10.0),
            record(2, Category::Social, 1000, 100, 90.0),
            record(3, Category::Article, 1000, 800, 20.0),
            record(4, Category::Social, 1000, 200, 80.0),
        ];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
        assert!((analysis.drift.first_half_mean - 50.0).abs() < 1e-3);
        assert!((analysis.drift.second_half_mean - 50.0).abs() < 1e-3);
        assert!(analysis.drift.difference.abs() < 1e-3);
        assert_eq!(analysis.drift.first_samples, 2);
        assert_eq!(analysis.drift.second_samples, 2);
    }

    #[test]
    fn test_positional_split_odd_count() {
        let records = vec![
            record(1, Category::Article, 1000, 900, 10.0),
            record(2, Category::Article, 1000, 800, 20.0),
            record(3, Category::Article, 1000, 700, 30.0),
        ];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.drift.first_samples, 1);
        assert_eq!(analysis.drift.second_samples, 2);
        assert!((analysis.drift.first_half_mean - 10.0).abs() < 1e-3);
        assert!((analysis.drift.second_half_mean - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_single_record_has_zero_drift_difference() {
        let records = vec![record(1, Category::Article, 1000, 600, 40.0)];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.drift.first_samples, 0);
        assert_eq!(analysis.drift.difference, 0.0);
    }

    #[test]
    fn test_buckets_split_on_thresholds() {
        let records = vec![
            record(1, Category::Article, 30000, 15000, 50.0),
            record(2, Category::Article, 1000, 650, 35.0),
            record(3, Category::Social, 1000, 750, 25.0),
            record(4, Category::Social, 1000, 550, 45.0),
        ];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();

        let high = &analysis.high_bucket;
        assert_eq!(high.count, 2);
        assert!((high.share_percent - 50.0).abs() < 1e-3);
        let detail = high.detail.as_ref().unwrap();
        assert_eq!(detail.article_count, 1);
        assert_eq!(detail.social_count, 1);
        assert!((detail.mean_original_tokens - 15500.0).abs() < 1.0);

        let low = &analysis.low_bucket;
        assert_eq!(low.count, 1);
        assert!((low.share_percent - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_bucket_has_no_detail() {
        let records = vec![record(1, Category::Article, 1000, 650, 35.0)];
        let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.high_bucket.count, 0);
        assert!(analysis.high_bucket.detail.is_none());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let records = vec![
            record(1, Category::Article, 22493, 14701, 34.6),
            record(1, Category::Social, 1415, 915, 35.3),
            record(2, Category::Article, 16209, 10308, 36.4),
        ];
        let config = AnalysisConfig::default();
        let a = analyze(&records, &config).unwrap();
        let b = analyze(&records, &config).unwrap();
        assert_eq!(a.savings, b.savings);
        assert_eq!(a.file_means, b.file_means);
        assert_eq!(a.size_savings_correlation, b.size_savings_correlation);
    }
}
