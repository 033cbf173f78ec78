//! Calendar bucket and window helpers.
//!
//! Aggregation reads always use half-open `[start, end)` windows so a record
//! on a boundary is counted exactly once. Bucket keys are normalized
//! calendar dates (day, or first-of-month), never wall-clock timestamps —
//! equality against a timestamp with a time component would never match.

use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::AppError;

/// First day of the month containing `date` — the car/target bucket key.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("every month has a first day")
}

/// First day of the following month; the exclusive end of a month window.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}

/// Exclusive end of a single-day window.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date + Duration::days(1)
}

pub fn days_in_month(date: NaiveDate) -> i64 {
    (next_month_start(date) - month_start(date)).num_days()
}

/// Parses a `YYYY-MM` month parameter into its bucket key (first day).
pub fn parse_month(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("month must be in YYYY-MM format, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_start_normalizes_mid_month() {
        assert_eq!(month_start(date(2025, 3, 17)), date(2025, 3, 1));
        assert_eq!(month_start(date(2025, 3, 1)), date(2025, 3, 1));
    }

    #[test]
    fn test_next_month_start_rolls_over_december() {
        assert_eq!(next_month_start(date(2025, 12, 31)), date(2026, 1, 1));
        assert_eq!(next_month_start(date(2025, 6, 10)), date(2025, 7, 1));
    }

    #[test]
    fn test_day_window_is_half_open() {
        let d = date(2025, 1, 31);
        assert_eq!(next_day(d), date(2025, 2, 1));
    }

    #[test]
    fn test_days_in_month_handles_leap_february() {
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2025, 2, 10)), 28);
        assert_eq!(days_in_month(date(2025, 1, 1)), 31);
        assert_eq!(days_in_month(date(2025, 4, 30)), 30);
    }

    #[test]
    fn test_parse_month_accepts_year_month() {
        assert_eq!(parse_month("2025-02").unwrap(), date(2025, 2, 1));
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        assert!(parse_month("2025").is_err());
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("not-a-month").is_err());
    }
}
