use crate::models::TransactionRecord;
use crate::types::TransactionId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiquidityError {
    #[error("no transactions to calculate")]
    EmptyInput,
    #[error("Numeric overflow occurred while adding transaction [{transaction_id}]")]
    Overflow {
        transaction_id: TransactionId
    }
}

impl LiquidityError {
    pub fn overflow(record: &TransactionRecord) -> Self {
        Self::Overflow { transaction_id: record.transaction_id.clone() }
    }
}
