use crate::engine::errors::IngestError;
use crate::liquidity::LiquidityCalculator;
use crate::models::{LiquidityReport, TransactionRecord};
use crate::parser;
use crate::storage::{RecordStorage, SnapshotRef, Storage};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, info, warn};

/// Upload limit applied when none is configured, 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Which records of a snapshot a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportView {
    #[default]
    All,
    CompletedOnly
}

/// Ingests CSV exports from disk into [`RecordStorage`] and reports on them.
pub struct IngestEngine {
    storage: Arc<RecordStorage>,
    calculator: LiquidityCalculator,
    max_upload_bytes: u64
}

impl IngestEngine {
    /// Creates a new engine instance with the provided storage.
    pub fn new(storage: Arc<RecordStorage>) -> Self {
        Self {
            storage,
            calculator: LiquidityCalculator::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Validates, reads and parses one export, then stores its records under the path.
    ///
    /// Returns the number of records stored. Nothing is stored if any step fails.
    pub async fn ingest(&self, path: &Path) -> Result<usize, IngestError> {
        self.spawn_ingest(path.to_path_buf()).await?
    }

    /// Ingests every path concurrently. Outcomes come back in input order and a failing
    /// file does not affect the others.
    pub async fn run(&self, paths: &[PathBuf]) -> Vec<(String, Result<usize, IngestError>)> {
        let handles: Vec<_> = paths.iter()
            .map(|path| (source_name(path), self.spawn_ingest(path.clone())))
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());

        for (source, handle) in handles {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(join_error) => {
                    error!("Ingest task for [{source}] did not complete: {join_error}");
                    Err(IngestError::from(join_error))
                }
            };

            outcomes.push((source, outcome));
        }

        outcomes
    }

    /// Aggregates the stored snapshot of `source`.
    ///
    /// # Errors
    /// Returns `IngestError::NoTransactions` if nothing (or an empty file) was ingested
    /// under `source`, and `IngestError::Liquidity` if aggregation fails.
    pub fn report(&self, source: &str, view: ReportView) -> Result<LiquidityReport, IngestError> {
        let snapshot = self.storage.load(source);
        self.report_snapshot(source, snapshot, view)
    }

    /// Aggregates the most recently ingested snapshot.
    pub fn latest_report(&self, view: ReportView) -> Result<LiquidityReport, IngestError> {
        match self.storage.latest() {
            Some((source, snapshot)) => self.report_snapshot(&source, Some(snapshot), view),
            None => self.report_snapshot("latest", None, view)
        }
    }

    fn report_snapshot(&self, source: &str, snapshot: Option<SnapshotRef>, view: ReportView) -> Result<LiquidityReport, IngestError> {
        let records = match snapshot {
            Some(records) if !records.is_empty() => records,
            _ => return Err(IngestError::NoTransactions { source_name: source.to_string() })
        };

        let report = match view {
            ReportView::All => self.calculator.aggregate(&records)?,
            ReportView::CompletedOnly => self.calculator.aggregate_completed_only(&records)?
        };

        info!("Calculated liquidity for {} of {} transactions in [{source}]", report.transaction_count, records.len());

        Ok(report)
    }

    fn spawn_ingest(&self, path: PathBuf) -> JoinHandle<Result<usize, IngestError>> {
        tokio::spawn(ingest_file(self.storage.clone(), path, self.max_upload_bytes))
    }
}

async fn ingest_file(storage: Arc<RecordStorage>, path: PathBuf, max_upload_bytes: u64) -> Result<usize, IngestError> {
    let source = source_name(&path);
    let records = spawn_blocking(move || read_export(&path, max_upload_bytes)).await?;

    let records = match records {
        Ok(records) => records,
        Err(error) => {
            warn!("Rejected [{source}]: {error}");
            return Err(error);
        }
    };

    let count = records.len();
    storage.save(&source, records);

    info!("Ingested [{source}] with {count} transactions");

    Ok(count)
}

fn source_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn read_export(path: &Path, max_upload_bytes: u64) -> Result<Vec<TransactionRecord>, IngestError> {
    let has_csv_extension = path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));

    if !has_csv_extension {
        return Err(IngestError::InvalidExtension { path: source_name(path) });
    }

    let file = File::open(path)?;

    if file.metadata()?.len() > max_upload_bytes {
        return Err(IngestError::TooLarge { path: source_name(path), limit: max_upload_bytes });
    }

    // Read one byte past the limit in case the file grew after the metadata check.
    let mut bytes = Vec::new();
    file.take(max_upload_bytes.saturating_add(1)).read_to_end(&mut bytes)?;

    if bytes.len() as u64 > max_upload_bytes {
        return Err(IngestError::TooLarge { path: source_name(path), limit: max_upload_bytes });
    }

    Ok(parser::parse(&bytes)?)
}
