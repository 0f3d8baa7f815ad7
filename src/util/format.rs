//! Display formatting for currency, counts and preset dates.
//!
//! All output uses en-US conventions: comma thousands separators, a leading
//! `$` for currency and `M/D/YYYY` dates.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use super::clock::parse_iso8601;

/// Format a dollar amount with no fractional digits, e.g. `$1,000,000`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_owned();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

/// Format a plain number with thousands separators and up to three
/// fractional digits, e.g. `11,000` or `1,234.5`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let is_zero = int_part == "0" && frac.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{}.{frac}", group_thousands(int_part))
    }
}

/// Format an RFC 3339 timestamp as `M/D/YYYY` (UTC date).
///
/// Unparseable input is returned unchanged so a hand-edited preset list
/// still renders.
pub fn format_date(iso: &str) -> String {
    match parse_iso8601(iso) {
        Some(dt) => format!("{}/{}/{}", u8::from(dt.month()), dt.day(), dt.year()),
        None => iso.to_owned(),
    }
}

/// `"$1,000,000 - $2,500,000"` style label for a currency range.
pub fn format_currency_range((min, max): (f64, f64)) -> String {
    format!("{} - {}", format_currency(min), format_currency(max))
}

/// `"1,000 - 5,000 sq ft"` style label for an area range.
pub fn format_area_range((min, max): (f64, f64)) -> String {
    format!("{} - {} sq ft", format_number(min), format_number(max))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
