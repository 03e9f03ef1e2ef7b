use anyhow::{Context, Result};
use clap::Parser;
use resumen::cli::{Cli, OutputFormat};
use resumen::csv_output::CsvExport;
use resumen::json_output::JsonReport;
use resumen::record::{BuiltinDataset, CompressionRecord, LogSource, RecordSource};
use resumen::{report, stats};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Collect records from the log file, or the built-in dataset without one
fn load_records(args: &Cli) -> Result<Vec<CompressionRecord>> {
    match &args.log_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read log file {}", path.display()))?;
            let records = LogSource::new(text)
                .records()
                .with_context(|| format!("failed to parse log file {}", path.display()))?;
            tracing::debug!(count = records.len(), path = %path.display(), "parsed log");
            Ok(records)
        }
        None => Ok(BuiltinDataset.records()?),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = args.analysis_config();
    let records = load_records(&args)?;

    let analysis = match stats::analyze(&records, &config) {
        Some(analysis) => analysis,
        None => {
            eprintln!("No compression records found.");
            return Ok(());
        }
    };

    match args.format {
        OutputFormat::Text => {
            let rendered = report::render(&analysis, &config);
            // Console output first: a failed file write must not cost the
            // already-computed report.
            print!("{rendered}");
            std::fs::write(&args.output, &rendered)
                .with_context(|| format!("failed to write report to {}", args.output.display()))?;
            tracing::debug!(path = %args.output.display(), "report written");
        }
        OutputFormat::Json => {
            println!("{}", JsonReport::from_analysis(&analysis).to_json()?);
        }
        OutputFormat::Csv => {
            print!("{}", CsvExport::new(&records).to_csv());
        }
    }

    Ok(())
}
