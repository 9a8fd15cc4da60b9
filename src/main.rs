use std::collections::BTreeMap;
use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use paypal_liquidity::engine::{IngestEngine, ReportView, DEFAULT_MAX_UPLOAD_BYTES};
use paypal_liquidity::models::LiquidityReport;
use paypal_liquidity::storage::RecordStorage;

/// Summarizes the liquidity of PayPal transaction CSV exports as JSON on stdout.
#[derive(Debug, Parser)]
#[command(name = "paypal-liquidity", version)]
struct Args {
    /// CSV exports to ingest
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Only aggregate completed transactions
    #[arg(long)]
    completed_only: bool,

    /// One of: error, warn, info, debug, trace
    #[arg(long, default_value = "error")]
    log_level: String,

    /// Reject exports larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: u64
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(parse_log_level(&args.log_level));

    let view = if args.completed_only { ReportView::CompletedOnly } else { ReportView::All };

    let storage = Arc::new(RecordStorage::new());
    let engine = IngestEngine::new(storage.clone())
        .with_max_upload_bytes(args.max_upload_bytes);

    let timer = Instant::now();
    let outcomes = engine.run(&args.files).await;
    let duration = timer.elapsed();

    info!("Ingested {} files in: {duration:?}", outcomes.len());
    log_stored_snapshots(&storage);

    let mut reports = BTreeMap::new();
    let mut failures = 0;

    for (source, outcome) in outcomes {
        let report = outcome.and_then(|_| engine.report(&source, view));

        match report {
            Ok(report) => {
                reports.insert(source, report);
            }
            Err(error) => {
                error!("Skipping [{source}]: {error}");
                eprintln!("{source}: {error}");
                failures += 1;
            }
        }
    }

    write_results_to_stdout(&reports)?;

    if failures > 0 {
        exit(1);
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the JSON report, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn log_stored_snapshots(storage: &RecordStorage) {
    for entry in storage.iter() {
        info!("Stored {} records for [{}]", entry.value().len(), entry.key());
    }
}

fn write_results_to_stdout(reports: &BTreeMap<String, LiquidityReport>) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, reports)?;
    writeln!(output)?;

    output.flush()?;

    Ok(())
}
