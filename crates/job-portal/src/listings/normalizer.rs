use chrono::{DateTime, NaiveDate};
use std::cmp::Ordering;

/// Canonical form for every label comparison: trimmed and lowercased.
///
/// A leading byte-order mark counts as whitespace; exported sheets and
/// copy-pasted labels carry them often enough.
pub fn normalize_label(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_lowercase()
}

/// Alphabetical ordering for option lists: case-insensitive first, then
/// lowercase ahead of uppercase for labels differing only by case.
pub(crate) fn locale_cmp(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}

/// Posting dates arrive as `YYYY-MM-DD` or RFC 3339; anything else is dropped.
pub(crate) fn parse_listing_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
