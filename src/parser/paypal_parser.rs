use crate::models::TransactionRecord;
use crate::parser::errors::FormatError;
use crate::parser::{HeaderIndex, LogicalField};
use crate::types::parse_amount;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::io::Read;
use tracing::debug;

/// Parses the raw bytes of a PayPal-style CSV export.
///
/// The first row is the header. Rows may be wider or narrower than the header, and rows
/// with only blank cells are skipped. Parsing is all-or-nothing: the first bad row fails
/// the whole file and no records are returned.
///
/// # Errors
/// Returns `FormatError` if:
/// - The input holds no rows.
/// - No header resolves to a transaction id column.
/// - A row has an empty or missing transaction id.
/// - An amount column holds a non-numeric value.
/// - The bytes are not readable CSV.
pub fn parse(input: &[u8]) -> Result<Vec<TransactionRecord>, FormatError> {
    parse_reader(input)
}

/// Same as [`parse`], reading the export from any byte source.
pub fn parse_reader<R: Read>(source: R) -> Result<Vec<TransactionRecord>, FormatError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut rows = reader.records();

    let Some(header) = rows.next() else {
        return Err(FormatError::Empty)
    };

    let index = HeaderIndex::resolve(header?.iter());

    if !index.contains(LogicalField::TransactionId) {
        return Err(FormatError::MissingTransactionId)
    }

    debug!("Resolved CSV header columns: {index:?}");

    let mut records = Vec::new();

    for row in rows {
        let row = row?;

        if row.iter().all(|cell| cell.trim().is_empty()) {
            debug!("Skipping blank row at line {}", line_of(&row));
            continue;
        }

        records.push(parse_row(&row, &index)?);
    }

    debug!("Parsed {} transaction records", records.len());

    Ok(records)
}

fn parse_row(row: &StringRecord, index: &HeaderIndex) -> Result<TransactionRecord, FormatError> {
    let line = line_of(row);

    let Some(transaction_id) = cell(row, index, LogicalField::TransactionId) else {
        return Err(FormatError::TransactionIdNotFound { line })
    };

    if transaction_id.is_empty() {
        return Err(FormatError::EmptyTransactionId { line })
    }

    Ok(TransactionRecord {
        transaction_id: transaction_id.to_string(),
        date: text(row, index, LogicalField::Date),
        name: text(row, index, LogicalField::Name),
        transaction_type: text(row, index, LogicalField::Type),
        status: text(row, index, LogicalField::Status),
        currency: text(row, index, LogicalField::Currency),
        gross: amount(row, index, LogicalField::Gross, line)?,
        fee: amount(row, index, LogicalField::Fee, line)?,
        net: amount(row, index, LogicalField::Net, line)?,
        balance: amount(row, index, LogicalField::Balance, line)?,
        note: text(row, index, LogicalField::Note)
    })
}

/// Trimmed cell for `field`, or `None` if the column is unmapped or past the end of the row.
fn cell<'r>(row: &'r StringRecord, index: &HeaderIndex, field: LogicalField) -> Option<&'r str> {
    index.position(field)
        .and_then(|position| row.get(position))
        .map(str::trim)
}

fn text(row: &StringRecord, index: &HeaderIndex, field: LogicalField) -> String {
    cell(row, index, field).unwrap_or_default().to_string()
}

fn amount(row: &StringRecord, index: &HeaderIndex, field: LogicalField, line: u64) -> Result<Decimal, FormatError> {
    let Some(value) = cell(row, index, field) else {
        return Ok(Decimal::ZERO)
    };

    parse_amount(value).map_err(|_| FormatError::InvalidAmount {
        line,
        field,
        value: value.to_string()
    })
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map_or(0, |position| position.line())
}
