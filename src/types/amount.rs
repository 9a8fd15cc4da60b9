use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use std::str::FromStr;

const CURRENCY_GLYPHS: [char; 4] = ['$', '€', '£', '¥'];
const THOUSANDS_SEPARATOR: char = ',';

/// Normalizes a free-form amount cell into a `Decimal`.
///
/// Currency glyphs and thousands separators are stripped wherever they appear, so both
/// `"-$29.90"` and `"$-29.90"` read as `-29.90`. A cell that is empty once stripped is `0`.
///
/// What remains must be a plain decimal literal, optionally in scientific notation. Literals
/// that are well formed but do not fit a `Decimal` fail with [`AmountError::OutOfRange`].
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let stripped: String = value.trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR && !CURRENCY_GLYPHS.contains(c))
        .collect();

    let stripped = stripped.trim();

    if stripped.is_empty() {
        return Ok(Decimal::ZERO);
    }

    if !is_decimal_literal(stripped) {
        return Err(AmountError::InvalidFormat(stripped.to_string()));
    }

    let parsed = if stripped.contains(['e', 'E']) {
        Decimal::from_scientific(stripped)
    } else {
        Decimal::from_str(stripped)
    };

    parsed.map_err(|_| AmountError::OutOfRange(stripped.to_string()))
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one mantissa digit.
///
/// `Decimal::from_str` also skips `_` between digits, which exports never use.
fn is_decimal_literal(text: &str) -> bool {
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (text, None)
    };

    let (integer, fraction) = unsigned(mantissa).split_once('.').unwrap_or((unsigned(mantissa), ""));

    let mantissa_valid = !(integer.is_empty() && fraction.is_empty())
        && all_digits(integer)
        && all_digits(fraction);

    mantissa_valid && exponent.is_none_or(|exponent| {
        let digits = unsigned(exponent);
        !digits.is_empty() && all_digits(digits)
    })
}

fn unsigned(text: &str) -> &str {
    text.strip_prefix(['+', '-']).unwrap_or(text)
}

fn all_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}
