// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar month expansion for the dense month view.

use crate::error::DomainError;
use time::{Date, Month};

/// Expands a (year, month) pair into every date of that month, in order.
///
/// # Arguments
///
/// * `year` - The calendar year
/// * `month` - The month number, 1 through 12
///
/// # Errors
///
/// Returns `DomainError::InvalidMonth` if `month` is outside 1..=12, or
/// `DomainError::DateArithmeticOverflow` if the year is outside the
/// representable calendar.
pub fn month_dates(year: i32, month: u8) -> Result<Vec<Date>, DomainError> {
    let month: Month =
        Month::try_from(month).map_err(|_| DomainError::InvalidMonth { month })?;

    let days: u8 = time::util::days_in_month(month, year);
    let mut dates: Vec<Date> = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let date: Date = Date::from_calendar_date(year, month, day).map_err(|_| {
            DomainError::DateArithmeticOverflow {
                operation: format!("building calendar date {year}-{month}-{day}"),
            }
        })?;
        dates.push(date);
    }
    Ok(dates)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_thirty_one_day_month() {
        let dates = month_dates(2026, 7).unwrap();
        assert_eq!(dates.len(), 31);
        assert_eq!(dates[0], date!(2026 - 07 - 01));
        assert_eq!(dates[30], date!(2026 - 07 - 31));
    }

    #[test]
    fn test_february_non_leap_year() {
        let dates = month_dates(2026, 2).unwrap();
        assert_eq!(dates.len(), 28);
    }

    #[test]
    fn test_february_leap_year() {
        let dates = month_dates(2028, 2).unwrap();
        assert_eq!(dates.len(), 29);
        assert_eq!(dates[28], date!(2028 - 02 - 29));
    }

    #[test]
    fn test_month_zero_rejected() {
        assert!(matches!(
            month_dates(2026, 0),
            Err(DomainError::InvalidMonth { month: 0 })
        ));
    }

    #[test]
    fn test_month_thirteen_rejected() {
        assert!(matches!(
            month_dates(2026, 13),
            Err(DomainError::InvalidMonth { month: 13 })
        ));
    }
}
