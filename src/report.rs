//! Plain-text report rendering
//!
//! Renders an [`Analysis`] into the fixed multi-section report layout. The
//! returned string is the single source of truth for output: the caller
//! prints it and writes the same bytes to the report file, so rendering must
//! stay deterministic down to the byte.

use crate::stats::{Analysis, AnalysisConfig, Bucket, CorrelationStrength, DriftVerdict, Summary};

const REPORT_WIDTH: usize = 80;

/// Render the full report, ending in a trailing newline
pub fn render(analysis: &Analysis, config: &AnalysisConfig) -> String {
    let mut report: Vec<String> = Vec::new();

    report.push(banner());
    report.push("COMPRESSION RUN STATISTICS".to_string());
    report.push(banner());
    report.push(String::new());

    general_summary(&mut report, analysis);
    savings_section(&mut report, analysis);
    ratio_section(&mut report, &analysis.ratio);
    original_size_section(&mut report, &analysis.original_tokens);
    category_section(&mut report, analysis);
    extremes_section(&mut report, analysis);
    correlation_section(&mut report, analysis);
    processing_order_section(&mut report, analysis, config);
    file_ranking_section(&mut report, analysis);
    bucket_section(&mut report, analysis);

    report.push(banner());

    let mut text = report.join("\n");
    text.push('\n');
    text
}

fn general_summary(report: &mut Vec<String>, analysis: &Analysis) {
    report.push("GENERAL SUMMARY".to_string());
    report.push(rule());
    report.push(format!("Total samples: {}", analysis.total_samples));
    report.push(format!(
        "  - Article compressions: {}",
        analysis.article_samples
    ));
    report.push(format!(
        "  - Social compressions: {}",
        analysis.social_samples
    ));
    report.push(String::new());
}

fn savings_section(report: &mut Vec<String>, analysis: &Analysis) {
    let s = &analysis.savings;
    report.push("SAVINGS STATISTICS (%)".to_string());
    report.push(rule());
    report.push(format!("Mean: {:.2}%", s.mean));
    report.push(format!("Median: {:.2}%", s.median));
    report.push(format!("Std dev: {:.2}%", s.stdev));
    report.push(format!(
        "Minimum: {:.2}% (file #{}, {})",
        s.min, analysis.min_savings.file_index, analysis.min_savings.category
    ));
    report.push(format!(
        "Maximum: {:.2}% (file #{}, {})",
        s.max, analysis.max_savings.file_index, analysis.max_savings.category
    ));
    report.push(format!("Range: {:.2}%", s.range));
    report.push(String::new());
}

fn ratio_section(report: &mut Vec<String>, ratio: &Summary) {
    report.push("COMPRESSION RATIO (compressed tokens / original tokens)".to_string());
    report.push(rule());
    report.push(format!(
        "Mean: {:.4} ({:.2}% of original)",
        ratio.mean,
        ratio.mean * 100.0
    ));
    report.push(format!(
        "Median: {:.4} ({:.2}% of original)",
        ratio.median,
        ratio.median * 100.0
    ));
    report.push(format!("Std dev: {:.4}", ratio.stdev));
    report.push(format!(
        "Minimum: {:.4} ({:.2}% of original)",
        ratio.min,
        ratio.min * 100.0
    ));
    report.push(format!(
        "Maximum: {:.4} ({:.2}% of original)",
        ratio.max,
        ratio.max * 100.0
    ));
    report.push(String::new());
}

fn original_size_section(report: &mut Vec<String>, tokens: &Summary) {
    report.push("ORIGINAL PROMPT SIZE (tokens)".to_string());
    report.push(rule());
    report.push(format!("Mean: {:.0} tokens", tokens.mean));
    report.push(format!("Median: {:.0} tokens", tokens.median));
    report.push(format!("Std dev: {:.0} tokens", tokens.stdev));
    report.push(format!("Minimum: {:.0} tokens", tokens.min));
    report.push(format!("Maximum: {:.0} tokens", tokens.max));
    report.push(String::new());
}

fn category_section(report: &mut Vec<String>, analysis: &Analysis) {
    report.push("CATEGORY COMPARISON".to_string());
    report.push(rule());
    report.push("Articles:".to_string());
    report.push(format!(
        "  - Mean savings: {:.2}%",
        analysis.article.savings.mean
    ));
    report.push(format!("  - Median: {:.2}%", analysis.article.savings.median));
    report.push(format!("  - Std dev: {:.2}%", analysis.article.savings.stdev));
    report.push(format!("  - Samples: {}", analysis.article.samples));
    report.push("Social posts:".to_string());
    report.push(format!(
        "  - Mean savings: {:.2}%",
        analysis.social.savings.mean
    ));
    report.push(format!("  - Median: {:.2}%", analysis.social.savings.median));
    report.push(format!("  - Std dev: {:.2}%", analysis.social.savings.stdev));
    report.push(format!("  - Samples: {}", analysis.social.samples));

    let difference = analysis.article.savings.mean - analysis.social.savings.mean;
    let direction = if difference > 0.0 { "more" } else { "less" };
    report.push(format!(
        "Difference: {:+.2}% (articles {} compressible than social posts)",
        difference, direction
    ));
    report.push(String::new());
}

fn extremes_section(report: &mut Vec<String>, analysis: &Analysis) {
    report.push("EXTREME CASES".to_string());
    report.push(rule());

    report.push("HIGHEST SAVINGS:".to_string());
    extreme_detail(report, analysis, true);
    report.push(String::new());

    report.push("LOWEST SAVINGS:".to_string());
    extreme_detail(report, analysis, false);
    report.push(String::new());
}

fn extreme_detail(report: &mut Vec<String>, analysis: &Analysis, highest: bool) {
    let record = if highest {
        &analysis.max_savings
    } else {
        &analysis.min_savings
    };
    report.push(format!("  File #{} ({})", record.file_index, record.category));
    report.push(format!(
        "  Original: {} tokens",
        group_thousands(record.original_tokens)
    ));
    report.push(format!(
        "  Compressed: {} tokens",
        group_thousands(record.compressed_tokens)
    ));
    report.push(format!("  Savings: {:.2}%", record.savings_percent));
    report.push(format!(
        "  Ratio: {:.4} ({:.2}% of original)",
        record.ratio,
        record.ratio * 100.0
    ));
}

fn correlation_section(report: &mut Vec<String>, analysis: &Analysis) {
    let r = analysis.size_savings_correlation;
    report.push("CORRELATION ANALYSIS".to_string());
    report.push(rule());
    report.push(format!("Original size vs savings: {:.4}", r));

    let strength = CorrelationStrength::classify(r);
    match strength {
        CorrelationStrength::Strong | CorrelationStrength::Moderate => {
            let strength_word = if strength == CorrelationStrength::Strong {
                "Strong"
            } else {
                "Moderate"
            };
            let direction = if r > 0.0 { "positive" } else { "negative" };
            let tendency = if r > 0.0 { "more" } else { "less" };
            report.push(format!("  → {} {} correlation", strength_word, direction));
            report.push(format!(
                "  → Larger prompts tend to have {} savings",
                tendency
            ));
        }
        CorrelationStrength::Negligible => {
            report.push("  → Weak or nonexistent correlation".to_string());
            report.push("  → Prompt size is not related to savings".to_string());
        }
    }
    report.push(String::new());
}

fn processing_order_section(
    report: &mut Vec<String>,
    analysis: &Analysis,
    config: &AnalysisConfig,
) {
    let drift = &analysis.drift;
    report.push("PROCESSING ORDER ANALYSIS".to_string());
    report.push(rule());
    report.push(format!(
        "First half of the run ({} samples):",
        drift.first_samples
    ));
    report.push(format!("  - Mean savings: {:.2}%", drift.first_half_mean));
    report.push(format!(
        "Second half of the run ({} samples):",
        drift.second_samples
    ));
    report.push(format!("  - Mean savings: {:.2}%", drift.second_half_mean));
    report.push(format!("Difference: {:+.2}%", drift.difference));

    match DriftVerdict::classify(drift.difference, config.drift_threshold_points) {
        DriftVerdict::Better => {
            report.push("  → Better compression in the second half".to_string());
        }
        DriftVerdict::Worse => {
            report.push("  → Worse compression in the second half".to_string());
        }
        DriftVerdict::Consistent => {
            report.push("  → Compression consistent across the run".to_string());
        }
    }
    report.push(String::new());
}

fn file_ranking_section(report: &mut Vec<String>, analysis: &Analysis) {
    report.push("TOP 5 FILES BY MEAN SAVINGS".to_string());
    report.push(rule());
    for (position, entry) in analysis.file_means.iter().take(5).enumerate() {
        report.push(format!(
            "{}. File #{}: {:.2}%",
            position + 1,
            entry.file_index,
            entry.mean_savings
        ));
    }
    report.push(String::new());

    report.push("BOTTOM 5 FILES BY MEAN SAVINGS".to_string());
    report.push(rule());
    let start = analysis.file_means.len().saturating_sub(5);
    for (position, entry) in analysis.file_means[start..].iter().enumerate() {
        report.push(format!(
            "{}. File #{}: {:.2}%",
            position + 1,
            entry.file_index,
            entry.mean_savings
        ));
    }
    report.push(String::new());
}

fn bucket_section(report: &mut Vec<String>, analysis: &Analysis) {
    report.push("HIGH AND LOW COMPRESSION ANALYSIS".to_string());
    report.push(rule());

    bucket_block(report, &analysis.high_bucket, "above", analysis);
    report.push(String::new());
    bucket_block(report, &analysis.low_bucket, "below", analysis);
    report.push(String::new());
}

fn bucket_block(report: &mut Vec<String>, bucket: &Bucket, side: &str, analysis: &Analysis) {
    report.push(format!(
        "Savings {} {:.1}%: {} samples ({:.1}% of total)",
        side, bucket.threshold, bucket.count, bucket.share_percent
    ));
    if let Some(detail) = &bucket.detail {
        report.push(format!(
            "  Mean original size: {:.0} tokens",
            detail.mean_original_tokens
        ));
        report.push(format!(
            "  Mean original size (overall): {:.0} tokens",
            analysis.original_tokens.mean
        ));
        report.push("  By category:".to_string());
        report.push(format!("    - Articles: {}", detail.article_count));
        report.push(format!("    - Social: {}", detail.social_count));
    }
}

fn banner() -> String {
    "=".repeat(REPORT_WIDTH)
}

fn rule() -> String {
    "-".repeat(REPORT_WIDTH)
}

/// Format an integer with comma thousands separators
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
