//! Display formatting for report captions and tables.

/// Group the digits of a non-negative integer string with `sep` every three.
fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Colombian notation: `.` thousands, `,` decimals, two decimals.
/// Zero renders as `"0"`.
///
/// ```
/// assert_eq!(carex_metrics::format::format_colombian(1234567.891), "1.234.567,89");
/// ```
pub fn format_colombian(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{},{frac_part}", group_thousands(int_part, '.'))
}

/// Whole US dollars with `,` grouping: `$1,234,568`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let whole = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && whole != "0" { "-" } else { "" };
    format!("{sign}${}", group_thousands(&whole, ','))
}

/// Percentage with two decimals: `50.00%`.
pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}
