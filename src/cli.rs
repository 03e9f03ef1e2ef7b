//! CLI argument parsing for Resumen

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::stats;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV record dump for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "resumen")]
#[command(version)]
#[command(about = "Compression run statistics analyzer", long_about = None)]
pub struct Cli {
    /// Terminal log to parse; the built-in dataset is used when omitted
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Report file path (text format only)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "compression_report.txt"
    )]
    pub output: PathBuf,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Savings percentage above which a sample counts as high compression
    #[arg(
        long = "high-threshold",
        value_name = "PERCENT",
        default_value_t = stats::HIGH_SAVINGS_THRESHOLD
    )]
    pub high_threshold: f32,

    /// Savings percentage below which a sample counts as low compression
    #[arg(
        long = "low-threshold",
        value_name = "PERCENT",
        default_value_t = stats::LOW_SAVINGS_THRESHOLD
    )]
    pub low_threshold: f32,

    /// Savings drift in percentage points treated as a real trend
    #[arg(
        long = "drift-threshold",
        value_name = "POINTS",
        default_value_t = stats::DRIFT_THRESHOLD_POINTS
    )]
    pub drift_threshold: f32,

    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Analysis thresholds selected on the command line
    pub fn analysis_config(&self) -> stats::AnalysisConfig {
        stats::AnalysisConfig {
            high_savings_threshold: self.high_threshold,
            low_savings_threshold: self.low_threshold,
            drift_threshold_points: self.drift_threshold,
        }
    }
}
