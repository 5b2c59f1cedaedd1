//! Birthdate handling

use chrono::{Datelike, NaiveDate};

/// ISO date format used on the wire and in form state
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole years between `birthdate` and `as_of`
///
/// Negative when `birthdate` is after `as_of`.
pub fn age_in_years(birthdate: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birthdate.year();
    if (as_of.month(), as_of.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }
    age
}

/// Parse an ISO `YYYY-MM-DD` birthdate
pub fn parse_birthdate(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

/// Render a date for display, e.g. "June 15, 1990"
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Render an ISO birthdate for display; empty input yields an empty string
/// and unparseable input is returned unchanged
pub fn display_birthdate(value: &str) -> String {
    match parse_birthdate(value) {
        Some(date) => format_display_date(date),
        None => value.to_string(),
    }
}
