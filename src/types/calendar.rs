//! Calendar helpers and the fixed year horizon covered by the historic dataset.

use std::ops::RangeInclusive;

/// First year covered by the dataset.
pub const MIN_YEAR: i32 = 1881;
/// Last year covered by the dataset (inclusive).
pub const MAX_YEAR: i32 = 2006;
/// Number of years between [`MIN_YEAR`] and [`MAX_YEAR`], both inclusive.
pub const RANGE_LENGTH: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;

/// Returns `true` for Gregorian leap years.
///
/// A year is a leap year when it is divisible by 4, except for century years,
/// which are only leap years when divisible by 400.
///
/// ```
/// use meteohistory::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-based) of `year`.
///
/// Months outside `1..=12` have no days and yield `0`.
///
/// ```
/// use meteohistory::days_in_month;
///
/// assert_eq!(days_in_month(2, 2004), 29);
/// assert_eq!(days_in_month(2, 2003), 28);
/// assert_eq!(days_in_month(7, 1950), 31);
/// ```
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// All years a caller can select, oldest first.
pub fn available_years() -> RangeInclusive<i32> {
    MIN_YEAR..=MAX_YEAR
}

/// Row index of `year` inside a [`crate::MonthlyMatrix`], or `None` when the
/// year lies outside the supported horizon.
pub(crate) fn year_offset(year: i32) -> Option<usize> {
    if available_years().contains(&year) {
        Some((year - MIN_YEAR) as usize)
    } else {
        None
    }
}
