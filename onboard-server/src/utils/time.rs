//! Timestamp helpers
//!
//! All persisted timestamps are Unix milliseconds. Metric windows are
//! trailing wall-clock windows, inclusive on both ends, never aligned to
//! calendar boundaries.

use chrono::{DateTime, NaiveDate};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Current wall-clock time in Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// "YYYY-MM" key for the month containing the given timestamp
pub fn month_key(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m").to_string())
        .unwrap_or_default()
}

/// Bounds of the trailing window ending at `now`: `[now - days, now]`
pub fn trailing_window(days: i64, now: i64) -> (i64, i64) {
    (now - days * MILLIS_PER_DAY, now)
}

/// Parse a "YYYY-MM-DD" calendar date, used for date-of-birth validation
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_formats_utc_month() {
        // 2024-03-15T12:00:00Z
        assert_eq!(month_key(1_710_504_000_000), "2024-03");
    }

    #[test]
    fn trailing_window_is_inclusive_of_now() {
        let (start, end) = trailing_window(30, 1_000 * MILLIS_PER_DAY);
        assert_eq!(start, 970 * MILLIS_PER_DAY);
        assert_eq!(end, 1_000 * MILLIS_PER_DAY);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("1999-04-30").is_some());
        assert!(parse_date("not-a-date").is_none());
        assert!(parse_date("1999-13-01").is_none());
    }
}
