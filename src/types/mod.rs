mod amount;
mod errors;

pub use amount::parse_amount;
pub use errors::AmountError;

pub type TransactionId = String;
pub type CurrencyCode = String;
