//! Rendering of store decimal numbers as JSON numbers.
//!
//! The key-value store keeps numbers as arbitrary-precision decimal strings
//! (`"7"`, `"7.50"`, `"1E+2"`). Clients expect a value with no fractional
//! part to arrive as a JSON integer of any size and anything else as a JSON
//! float, so `"7.0"` renders as `7` while `"7.5"` renders as `7.5`.
//!
//! Integer literals longer than 64 bits rely on `serde_json`'s
//! `arbitrary_precision` feature, which the workspace enables.

use serde_json::Number;

/// Longest integer literal rendered, in digits.
///
/// The store's largest magnitude is `9.99E+125`; anything wider is treated
/// as a float.
pub const MAX_INTEGER_DIGITS: usize = 126;

/// A decimal string classified for JSON output.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNumber {
    /// Integral value as canonical digits (no leading zeros, `-` for
    /// negatives, `0` for zero).
    Integer(String),
    /// Value with a fractional part.
    Float(f64),
}

impl JsonNumber {
    /// Convert into a `serde_json::Number`.
    ///
    /// Non-finite floats have no JSON form and come back as `None`.
    #[must_use]
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Self::Integer(digits) => digits.parse().ok(),
            Self::Float(f) => Number::from_f64(*f),
        }
    }
}

/// Decomposed decimal literal: sign, all significant digits, and the position
/// of the decimal point relative to the start of `digits`.
struct Decimal<'a> {
    negative: bool,
    digits: [&'a str; 2],
    point: i64,
}

impl Decimal<'_> {
    fn digit_iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.digits.iter().flat_map(|part| part.bytes())
    }

    fn digit_count(&self) -> usize {
        self.digits.iter().map(|part| part.len()).sum()
    }
}

fn parse_decimal(text: &str) -> Option<Decimal<'_>> {
    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => (&unsigned[..idx], unsigned[idx + 1..].parse::<i64>().ok()?),
        None => (unsigned, 0),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let int_len = i64::try_from(int_part.len()).ok()?;
    Some(Decimal {
        negative,
        digits: [int_part, frac_part],
        point: int_len.checked_add(exponent)?,
    })
}

/// Classify a store decimal string for JSON output.
///
/// Returns `None` when `text` is not a decimal literal.
#[must_use]
pub fn classify(text: &str) -> Option<JsonNumber> {
    let decimal = parse_decimal(text)?;
    let point = usize::try_from(decimal.point.max(0)).ok()?;

    // Everything at or after `point` is fractional.
    let integral = decimal.digit_iter().skip(point).all(|b| b == b'0');
    if integral {
        if let Some(digits) = integer_text(&decimal, point) {
            return Some(JsonNumber::Integer(digits));
        }
    }

    text.trim().parse::<f64>().ok().map(JsonNumber::Float)
}

/// Canonical integer digits of an integral decimal, or `None` when wider
/// than [`MAX_INTEGER_DIGITS`].
fn integer_text(decimal: &Decimal<'_>, point: usize) -> Option<String> {
    let padding = point.saturating_sub(decimal.digit_count());
    let significant: String = decimal
        .digit_iter()
        .take(point)
        .skip_while(|b| *b == b'0')
        .map(char::from)
        .collect();

    if significant.is_empty() {
        return Some("0".to_owned());
    }
    if significant.len().checked_add(padding)? > MAX_INTEGER_DIGITS {
        return None;
    }

    let mut out = String::with_capacity(significant.len() + padding + 1);
    if decimal.negative {
        out.push('-');
    }
    out.push_str(&significant);
    out.extend(std::iter::repeat_n('0', padding));
    Some(out)
}
