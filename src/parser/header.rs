use std::fmt;
use std::fmt::{Display, Formatter};

/// Canonical transaction attribute, independent of the literal column header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    TransactionId,
    Date,
    Name,
    Type,
    Status,
    Currency,
    Gross,
    Fee,
    Net,
    Balance,
    Note
}

impl LogicalField {
    pub const ALL: [LogicalField; 11] = [
        LogicalField::TransactionId,
        LogicalField::Date,
        LogicalField::Name,
        LogicalField::Type,
        LogicalField::Status,
        LogicalField::Currency,
        LogicalField::Gross,
        LogicalField::Fee,
        LogicalField::Net,
        LogicalField::Balance,
        LogicalField::Note
    ];

    pub fn name(self) -> &'static str {
        match self {
            LogicalField::TransactionId => "transaction_id",
            LogicalField::Date => "date",
            LogicalField::Name => "name",
            LogicalField::Type => "type",
            LogicalField::Status => "status",
            LogicalField::Currency => "currency",
            LogicalField::Gross => "gross",
            LogicalField::Fee => "fee",
            LogicalField::Net => "net",
            LogicalField::Balance => "balance",
            LogicalField::Note => "note"
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl Display for LogicalField {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

type HeaderPredicate = fn(&str) -> bool;

/// Header synonyms, tried in order against a lower-cased, trimmed header cell. The first
/// matching rule decides the cell.
const HEADER_RULES: [(HeaderPredicate, LogicalField); 11] = [
    (|cell| cell.contains("transaction") && cell.contains("id"), LogicalField::TransactionId),
    (|cell| matches!(cell, "date" | "timestamp"), LogicalField::Date),
    (|cell| matches!(cell, "name" | "from name" | "to name"), LogicalField::Name),
    (|cell| matches!(cell, "type" | "transaction type"), LogicalField::Type),
    (|cell| matches!(cell, "status" | "transaction status"), LogicalField::Status),
    (|cell| matches!(cell, "currency" | "currency code"), LogicalField::Currency),
    (|cell| matches!(cell, "gross" | "amount" | "gross amount"), LogicalField::Gross),
    (|cell| matches!(cell, "fee" | "fee amount"), LogicalField::Fee),
    (|cell| matches!(cell, "net" | "net amount"), LogicalField::Net),
    (|cell| matches!(cell, "balance" | "account balance"), LogicalField::Balance),
    (|cell| cell.contains("note") || cell.contains("message") || cell == "item title", LogicalField::Note)
];

/// Resolves a single header cell to the logical field it names, if any.
pub fn classify_header(cell: &str) -> Option<LogicalField> {
    let cell = cell.trim().trim_start_matches('\u{feff}').trim().to_lowercase();

    HEADER_RULES.iter()
        .find(|(predicate, _)| predicate(&cell))
        .map(|(_, field)| *field)
}

/// Column position of each logical field for one file's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: [Option<usize>; LogicalField::ALL.len()]
}

impl HeaderIndex {
    /// Builds the index from the header cells in a single left-to-right scan.
    ///
    /// When several columns name the same field, the last one wins.
    pub fn resolve<'a, I>(header: I) -> Self
    where
        I: IntoIterator<Item = &'a str>
    {
        let mut index = Self::default();

        for (position, cell) in header.into_iter().enumerate() {
            if let Some(field) = classify_header(cell) {
                index.positions[field.slot()] = Some(position);
            }
        }

        index
    }

    pub fn position(&self, field: LogicalField) -> Option<usize> {
        self.positions[field.slot()]
    }

    pub fn contains(&self, field: LogicalField) -> bool {
        self.position(field).is_some()
    }
}
