//! FILENAME: core/projection-engine/src/format.rs
//! PURPOSE: Display formatting for projected values.
//! CONTEXT: Renderers never format values themselves; what a cell shows is
//! decided here, once, so every output format agrees on row content.

use crate::definition::DateLocale;
use chrono::NaiveDateTime;

/// Currency as a fixed two-decimal string with a literal `$` prefix:
/// `$1234.50`, `-$5.00`.
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        format!("-${}", formatted)
    } else {
        format!("${}", formatted)
    }
}

/// Plain number without unnecessary decimal places.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // For integers, don't show decimal point
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Calendar date in the caller's short date style.
pub fn format_short_date(value: NaiveDateTime, locale: DateLocale) -> String {
    value.format(locale.short_date_pattern()).to_string()
}
