//! Date handling for displayed dates.
//!
//! The form layer stores ISO calendar dates (`YYYY-MM-DD`). Every date that
//! reaches the page is shown as `day month-abbreviation year`, e.g.
//! `5 Mar 2024`, independent of the host locale.

use chrono::NaiveDate;

/// Parse an ISO calendar date. Accepts a trailing time part
/// (`2024-03-05T10:00:00Z`) since some form inputs hand those over.
pub fn parse_iso(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Format a date as `5 Mar 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Format a stored date string for display.
///
/// Empty input stays empty; input that isn't an ISO date is shown verbatim
/// rather than rejected.
pub fn display_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match parse_iso(raw) {
        Some(date) => format_date(date),
        None => raw.trim().to_string(),
    }
}

/// Display `raw`, or `fallback` when `raw` is empty.
pub fn display_date_or(raw: &str, fallback: NaiveDate) -> String {
    if raw.trim().is_empty() {
        format_date(fallback)
    } else {
        display_date(raw)
    }
}
