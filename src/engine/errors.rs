use crate::models::LiquidityError;
use crate::parser::FormatError;
use thiserror::Error;
use tokio::task::JoinError;

/// Rejections raised while ingesting an export or reporting on it. All of them except
/// `Io` and `Task` point at input the caller can correct.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File must have .csv extension: {path}")]
    InvalidExtension {
        path: String
    },
    #[error("File size exceeds the {limit} byte limit: {path}")]
    TooLarge {
        path: String,
        limit: u64
    },
    #[error("Unable to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse CSV: {0}")]
    Format(#[from] FormatError),
    #[error("Failed to calculate liquidity: {0}")]
    Liquidity(#[from] LiquidityError),
    #[error("No transactions available for [{source_name}]. Please ingest a CSV first.")]
    NoTransactions {
        source_name: String
    },
    #[error("Ingest task did not complete: {0}")]
    Task(#[from] JoinError)
}
