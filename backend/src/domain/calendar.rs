//! Calendar arithmetic used by the payment schedule generator.
//!
//! Weeks start on Sunday throughout this module: day offset 0 is Sunday,
//! 1 is Monday and so on up to 6 for Saturday.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        2 => {
            if is_leap_year(date.year()) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// The Sunday on or before `date`
pub fn start_of_week(date: NaiveDate) -> Option<NaiveDate> {
    let offset = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(offset))
}

/// First day of the month containing `date`
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

pub fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

/// Advance by whole months. Callers pass first-of-month anchors, so chrono's
/// end-of-month clamping never kicks in.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// The `day`-th day of the month containing `anchor`, clamped to the last day
/// of that month (day 31 in April gives April 30).
pub fn day_in_month_clamped(anchor: NaiveDate, day: u32) -> NaiveDate {
    let actual_day = day.min(days_in_month(anchor)).max(1);
    anchor.with_day(actual_day).unwrap_or(anchor)
}

/// Inclusive range check
pub fn is_within(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

/// A due date is overdue once `today` is strictly after it
pub fn is_overdue(scheduled: NaiveDate, today: NaiveDate) -> bool {
    today > scheduled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2025, 1, 15)), 31);
        assert_eq!(days_in_month(date(2025, 2, 1)), 28);
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2025, 4, 30)), 30);
        assert_eq!(days_in_month(date(2025, 12, 1)), 31);
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
    }

    #[test]
    fn test_start_of_week_is_sunday() {
        // 2025-01-01 is a Wednesday
        assert_eq!(start_of_week(date(2025, 1, 1)), Some(date(2024, 12, 29)));
        // a Sunday is its own week start
        assert_eq!(start_of_week(date(2025, 1, 5)), Some(date(2025, 1, 5)));
        // Saturday is the last day of the week
        assert_eq!(start_of_week(date(2025, 1, 11)), Some(date(2025, 1, 5)));
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(start_of_month(date(2025, 3, 17)), date(2025, 3, 1));
        assert_eq!(start_of_month(date(2025, 3, 1)), date(2025, 3, 1));
    }

    #[test]
    fn test_add_months_from_anchor() {
        assert_eq!(add_months(date(2025, 1, 1), 1), Some(date(2025, 2, 1)));
        assert_eq!(add_months(date(2025, 11, 1), 3), Some(date(2026, 2, 1)));
    }

    #[test]
    fn test_day_in_month_clamped() {
        assert_eq!(day_in_month_clamped(date(2025, 4, 1), 31), date(2025, 4, 30));
        assert_eq!(day_in_month_clamped(date(2025, 2, 1), 30), date(2025, 2, 28));
        assert_eq!(day_in_month_clamped(date(2024, 2, 1), 31), date(2024, 2, 29));
        assert_eq!(day_in_month_clamped(date(2025, 5, 1), 15), date(2025, 5, 15));
    }

    #[test]
    fn test_is_within_is_inclusive() {
        let start = date(2025, 1, 10);
        let end = date(2025, 1, 20);
        assert!(is_within(start, start, end));
        assert!(is_within(end, start, end));
        assert!(!is_within(date(2025, 1, 9), start, end));
        assert!(!is_within(date(2025, 1, 21), start, end));
    }

    #[test]
    fn test_is_overdue() {
        assert!(!is_overdue(date(2025, 1, 10), date(2025, 1, 10)));
        assert!(is_overdue(date(2025, 1, 10), date(2025, 1, 11)));
    }
}
