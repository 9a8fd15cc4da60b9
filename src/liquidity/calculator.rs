use crate::models::{LiquidityError, LiquidityReport, ReportAccumulator, Status, TransactionRecord};
use tracing::debug;

/// Reduces transaction records into a [`LiquidityReport`].
///
/// The calculator holds no state between calls, so one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityCalculator;

impl LiquidityCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregates every record. Sums and status counts do not depend on record order.
    ///
    /// # Errors
    /// Returns `LiquidityError` if:
    /// - `records` is empty.
    /// - A running total overflows.
    pub fn aggregate(&self, records: &[TransactionRecord]) -> Result<LiquidityReport, LiquidityError> {
        self.aggregate_iter(records.iter())
    }

    /// Aggregates only the completed records.
    ///
    /// Unlike [`LiquidityCalculator::aggregate`], having no completed records is not an
    /// error and yields a zero-valued report.
    pub fn aggregate_completed_only(&self, records: &[TransactionRecord]) -> Result<LiquidityReport, LiquidityError> {
        let mut completed = records.iter()
            .filter(|record| record.status() == Status::Completed)
            .peekable();

        if completed.peek().is_none() {
            debug!("No completed transactions among {} records", records.len());
            return Ok(LiquidityReport::default());
        }

        self.aggregate_iter(completed)
    }

    fn aggregate_iter<'a, I>(&self, records: I) -> Result<LiquidityReport, LiquidityError>
    where
        I: Iterator<Item = &'a TransactionRecord>
    {
        let mut accumulator = ReportAccumulator::new();
        let mut seen = false;

        for record in records {
            accumulator.accumulate(record)?;
            seen = true;
        }

        if !seen {
            return Err(LiquidityError::EmptyInput);
        }

        let report = accumulator.finish();

        debug!("Aggregated {} transactions, final balance {}", report.transaction_count, report.final_balance);

        Ok(report)
    }
}

/// Shorthand for [`LiquidityCalculator::aggregate`].
pub fn aggregate(records: &[TransactionRecord]) -> Result<LiquidityReport, LiquidityError> {
    LiquidityCalculator::new().aggregate(records)
}

/// Shorthand for [`LiquidityCalculator::aggregate_completed_only`].
pub fn aggregate_completed_only(records: &[TransactionRecord]) -> Result<LiquidityReport, LiquidityError> {
    LiquidityCalculator::new().aggregate_completed_only(records)
}
