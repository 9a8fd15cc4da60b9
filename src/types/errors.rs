use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: cannot parse '{0}' as a number")]
    InvalidFormat(String),
    #[error("Amount error: '{0}' is outside the supported decimal range")]
    OutOfRange(String)
}
