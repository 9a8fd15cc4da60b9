use crate::parser::LogicalField;
use thiserror::Error;

/// Reasons a CSV export is rejected. Every variant fails the whole file.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("CSV file is empty")]
    Empty,
    #[error("CSV is missing required field: transaction_id")]
    MissingTransactionId,
    #[error("row {line}: transaction id not found")]
    TransactionIdNotFound {
        line: u64
    },
    #[error("row {line}: transaction id is empty")]
    EmptyTransactionId {
        line: u64
    },
    #[error("row {line}: invalid {field} amount '{value}'")]
    InvalidAmount {
        line: u64,
        field: LogicalField,
        value: String
    },
    #[error("failed to read CSV: {0}")]
    Malformed(#[from] csv::Error)
}
