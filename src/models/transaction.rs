use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Status;
use crate::types::{CurrencyCode, TransactionId};

/// A single normalized row from a PayPal-style CSV export.
///
/// Only `transaction_id` is guaranteed to be present. Text fields default to an empty
/// string and amounts to zero when their column is missing or the row is short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    /// Non-empty identifier of the row. Uniqueness is not enforced.
    pub transaction_id: TransactionId,
    pub date: String,
    pub name: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Raw status text as exported, see [`TransactionRecord::status`] for the normalized form.
    pub status: String,
    pub currency: CurrencyCode,
    pub gross: Decimal,
    pub fee: Decimal,
    pub net: Decimal,
    /// Running account balance, zero when the export does not carry one.
    pub balance: Decimal,
    pub note: String
}

impl TransactionRecord {
    pub fn new(transaction_id: impl Into<TransactionId>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            ..Self::default()
        }
    }

    pub fn status(&self) -> Status {
        Status::classify(&self.status)
    }
}
