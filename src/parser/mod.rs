mod errors;
mod header;
mod paypal_parser;

pub use errors::FormatError;
pub use header::{classify_header, HeaderIndex, LogicalField};
pub use paypal_parser::{parse, parse_reader};
