mod errors;
mod report;
#[cfg(test)]
mod tests;
mod transaction;

pub use errors::LiquidityError;
pub use report::LiquidityReport;
pub use transaction::TransactionRecord;

pub(crate) use report::ReportAccumulator;

/// Normalized transaction status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Completed,
    Pending,
    Refunded,
    Other
}

impl Status {
    /// Maps raw export status text onto a bucket. Matching is exact against the known spellings.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "Completed" | "completed" | "Complete" | "Success" | "success" => Status::Completed,
            "Pending" | "pending" | "In Progress" | "Processing" => Status::Pending,
            "Refunded" | "refunded" | "Reversed" | "Cancelled" | "cancelled" => Status::Refunded,
            _ => Status::Other
        }
    }
}
