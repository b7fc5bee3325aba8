//! # Utilities Module
//!
//! ## Purpose
//! Common text and date helpers used by the normalizer and the portal
//! client.
//!
//! ## Input/Output Specification
//! - **Input**: Raw portal text fields, request dates
//! - **Output**: Cleaned strings, portal-formatted date strings
//! - **Functions**: Whitespace normalization, date formatting, default ranges

use chrono::{Duration, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Text processing utilities
pub struct TextUtils;

/// Date handling utilities
pub struct DateUtils;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

impl TextUtils {
    /// Collapse runs of whitespace into single spaces and trim the ends.
    ///
    /// Portal fields routinely carry stray newlines and double spaces.
    pub fn clean(text: &str) -> String {
        whitespace_re().replace_all(text.trim(), " ").into_owned()
    }
}

impl DateUtils {
    /// Format a date the way the portal expects (ISO `YYYY-MM-DD`)
    pub fn format_portal_date(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Default search window: the last 30 days of filings
    pub fn default_range() -> (NaiveDate, NaiveDate) {
        let end = Utc::now().date_naive();
        (end - Duration::days(30), end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(TextUtils::clean("  RAM   KUMAR \n REDDY "), "RAM KUMAR REDDY");
        assert_eq!(TextUtils::clean(""), "");
        assert_eq!(TextUtils::clean("FLIPKART"), "FLIPKART");
    }

    #[test]
    fn test_format_portal_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(DateUtils::format_portal_date(date), "2024-01-05");
    }

    #[test]
    fn test_default_range_is_thirty_days() {
        let (from, to) = DateUtils::default_range();
        assert_eq!(to - from, Duration::days(30));
    }
}
