//! Normalization applied before any filtering: text trimming and
//! locale-formatted amount parsing.

use crate::model::Amount;

/// Parse an amount written with `.` as thousands separator and `,` as
/// decimal separator (`"1.234,56"` → `1234.56`).
///
/// Returns `None` when the text is not a number after conversion.
pub fn parse_locale_amount(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace('.', "").replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Outcome of normalizing one amount cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedAmount {
    pub value: f64,
    /// Text that could not be parsed and was coerced to `0.0`.
    pub coerced: bool,
}

/// Normalize an amount cell: numbers pass through, locale text is parsed,
/// null and unparseable text become `0.0`.
pub fn normalize_amount(amount: &Amount) -> NormalizedAmount {
    match amount {
        Amount::Number(v) => NormalizedAmount { value: *v, coerced: false },
        Amount::Null => NormalizedAmount { value: 0.0, coerced: false },
        Amount::Text(text) => match parse_locale_amount(text) {
            Some(value) => NormalizedAmount { value, coerced: false },
            None => NormalizedAmount {
                value: 0.0,
                coerced: !text.trim().is_empty(),
            },
        },
    }
}

/// Amount as seen by the validity rule: `None` for null, otherwise the
/// normalized value. Blank text counts as null.
pub fn amount_value(amount: &Amount) -> Option<f64> {
    match amount {
        Amount::Null => None,
        Amount::Text(t) if t.trim().is_empty() => None,
        other => Some(normalize_amount(other).value),
    }
}

/// Trimmed copy of a text field.
pub fn clean(text: &str) -> String {
    text.trim().to_string()
}

/// Matching key for case-insensitive comparisons: trimmed and upper-cased.
pub fn match_key(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Round half away from zero to 2 decimals.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Normalize -0.0 so identical inputs serialize identically.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
