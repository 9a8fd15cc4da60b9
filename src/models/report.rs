use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::errors::LiquidityError;
use crate::models::{Status, TransactionRecord};
use crate::types::CurrencyCode;

/// Liquidity summary over a set of transaction records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiquidityReport {
    pub total_gross: Decimal,
    pub total_fees: Decimal,
    pub total_net: Decimal,
    /// Largest non-zero balance seen, or `total_net` when no row carried a balance.
    pub final_balance: Decimal,
    pub transaction_count: usize,
    /// Net amount per currency code. Rows without a currency are not bucketed.
    pub by_currency: BTreeMap<CurrencyCode, Decimal>,
    pub completed_count: usize,
    pub pending_count: usize,
    pub refunded_count: usize
}

/// Running state of a single aggregation pass.
#[derive(Debug, Default)]
pub(crate) struct ReportAccumulator {
    report: LiquidityReport,
    max_balance: Option<Decimal>
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record into the running totals.
    ///
    /// # Errors
    /// Returns `LiquidityError::Overflow` if any running sum leaves the `Decimal` range.
    pub fn accumulate(&mut self, record: &TransactionRecord) -> Result<(), LiquidityError> {
        let report = &mut self.report;

        report.total_gross = checked_sum(report.total_gross, record.gross, record)?;
        report.total_fees = checked_sum(report.total_fees, record.fee, record)?;
        report.total_net = checked_sum(report.total_net, record.net, record)?;
        report.transaction_count += 1;

        if !record.currency.is_empty() {
            let bucket = report.by_currency.entry(record.currency.clone()).or_default();
            *bucket = checked_sum(*bucket, record.net, record)?;
        }

        // A zero balance means the export left the column blank.
        if !record.balance.is_zero() {
            self.max_balance = Some(match self.max_balance {
                Some(current) => larger_balance(current, record.balance),
                None => record.balance
            });
        }

        match record.status() {
            Status::Completed => report.completed_count += 1,
            Status::Pending => report.pending_count += 1,
            Status::Refunded => report.refunded_count += 1,
            Status::Other => {}
        }

        Ok(())
    }

    pub fn finish(self) -> LiquidityReport {
        let mut report = self.report;
        report.final_balance = self.max_balance.unwrap_or(report.total_net);
        report
    }
}

/// Equal balances written with different scales (`100.0`, `100.00`) keep the finer scale,
/// so the reported value does not depend on row order.
fn larger_balance(current: Decimal, candidate: Decimal) -> Decimal {
    match candidate.cmp(&current) {
        Ordering::Greater => candidate,
        Ordering::Equal if candidate.scale() > current.scale() => candidate,
        _ => current
    }
}

fn checked_sum(total: Decimal, amount: Decimal, record: &TransactionRecord) -> Result<Decimal, LiquidityError> {
    total.checked_add(amount)
        .ok_or_else(|| LiquidityError::overflow(record))
}
