//! End-to-end statistics scenarios against the library API
//!
//! Covers the aggregation contract: exact means, stable extremes, the
//! input-order positional split, cross-category per-file averaging and the
//! built-in dataset invariants.

use resumen::record::{BuiltinDataset, Category, CompressionRecord, RecordSource};
use resumen::report;
use resumen::stats::{analyze, AnalysisConfig};

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
fn test_two_record_run_end_to_end() {
    let records = vec![
        record(1, Category::Article, 22493, 14701, 34.6),
        record(2, Category::Article, 16209, 10308, 36.4),
    ];
    let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.total_samples, 2);
    assert!((analysis.savings.mean - 35.5).abs() < 1e-3);
    assert!(analysis.savings.stdev > 0.0);
    assert_eq!(analysis.max_savings.file_index, 2);
    assert!((analysis.max_savings.savings_percent - 36.4).abs() < 1e-4);
    assert_eq!(analysis.min_savings.file_index, 1);
    assert!((analysis.min_savings.savings_percent - 34.6).abs() < 1e-4);
}

#[test]
fn test_per_file_mean_averages_across_categories() {
    let records = vec![
        record(1, Category::Article, 10_000, 5_000, 50.0),
        record(1, Category::Social, 1_000, 700, 30.0),
    ];
    let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.file_means.len(), 1);
    assert!((analysis.file_means[0].mean_savings - 40.0).abs() < 1e-3);
}

#[test]
fn test_positional_split_ignores_categories() {
    // Interleaved categories still split by position, never by grouping.
    let records = vec![
        record(1, Category::Article, 1000, 900, 10.0),
        record(1, Category::Social, 1000, 100, 90.0),
        record(2, Category::Article, 1000, 800, 20.0),
        record(2, Category::Social, 1000, 200, 80.0),
    ];
    let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
    assert!((analysis.drift.first_half_mean - 50.0).abs() < 1e-3);
    assert!((analysis.drift.second_half_mean - 50.0).abs() < 1e-3);
}

#[test]
fn test_extreme_selection_prefers_first_occurrence() {
    let records = vec![
        record(7, Category::Article, 1000, 600, 40.0),
        record(9, Category::Social, 2000, 1200, 40.0),
    ];
    let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.max_savings.file_index, 7);
    // Both tie for minimum as well; first still wins.
    assert_eq!(analysis.min_savings.file_index, 7);
}

#[test]
fn test_empty_input_has_no_analysis() {
    assert!(analyze(&[], &AnalysisConfig::default()).is_none());
}

#[test]
fn test_builtin_dataset_aggregates() {
    let records = BuiltinDataset.records().unwrap();
    let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.total_samples, 80);
    assert_eq!(analysis.article_samples, 40);
    assert_eq!(analysis.social_samples, 40);

    // Highest savings in the run is file 8's article at 48.4%.
    assert_eq!(analysis.max_savings.file_index, 8);
    assert_eq!(analysis.max_savings.category, Category::Article);
    assert!((analysis.max_savings.savings_percent - 48.4).abs() < 1e-4);

    // Lowest is file 20's social prompt at 31.5%.
    assert_eq!(analysis.min_savings.file_index, 20);
    assert_eq!(analysis.min_savings.category, Category::Social);
    assert!((analysis.min_savings.savings_percent - 31.5).abs() < 1e-4);

    // Every file index appears in both phases, so 40 per-file means.
    assert_eq!(analysis.file_means.len(), 40);

    assert!(analysis.savings.mean > 30.0 && analysis.savings.mean < 40.0);
    assert!(analysis.ratio.mean > 0.5 && analysis.ratio.mean < 0.7);
}

#[test]
fn test_summary_counts_round_trip_through_report() {
    let records = BuiltinDataset.records().unwrap();
    let config = AnalysisConfig::default();
    let analysis = analyze(&records, &config).unwrap();
    let rendered = report::render(&analysis, &config);

    let count_after = |prefix: &str| -> usize {
        rendered
            .lines()
            .find_map(|line| line.trim_start().strip_prefix(prefix))
            .and_then(|rest| rest.trim().parse().ok())
            .unwrap_or_else(|| panic!("count line `{}` missing", prefix))
    };

    assert_eq!(count_after("Total samples:"), analysis.total_samples);
    assert_eq!(count_after("- Article compressions:"), analysis.article_samples);
    assert_eq!(count_after("- Social compressions:"), analysis.social_samples);
}

#[test]
fn test_ratio_always_recomputed_from_tokens() {
    for record in BuiltinDataset.records().unwrap() {
        let expected = record.compressed_tokens as f32 / record.original_tokens as f32;
        assert!((record.ratio - expected).abs() < 1e-6);
    }
}

#[test]
fn test_unknown_category_counts_toward_totals_only() {
    let records = vec![
        record(1, Category::Unknown, 1000, 650, 35.0),
        record(2, Category::Article, 1000, 600, 40.0),
    ];
    let analysis = analyze(&records, &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.total_samples, 2);
    assert_eq!(analysis.article_samples, 1);
    assert_eq!(analysis.social_samples, 0);
}
