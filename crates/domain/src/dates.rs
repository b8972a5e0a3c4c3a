// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date parsing and formatting.
//!
//! Dates in this system are naive calendar dates with no time component.
//! They travel as ISO `YYYY-MM-DD` strings on the wire and in the database.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The ISO calendar date format used everywhere dates are serialized as text.
const ISO_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses an ISO `YYYY-MM-DD` string into a `Date`.
///
/// # Arguments
///
/// * `value` - The date string to parse
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid
/// ISO calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, ISO_DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a `Date` as an ISO `YYYY-MM-DD` string.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Expands an inclusive date range into the ordered list of dates it covers.
///
/// # Arguments
///
/// * `start` - The first date in the range
/// * `end` - The last date in the range (inclusive)
///
/// # Errors
///
/// Returns `DomainError::InvalidRange` if `start` is after `end`, or
/// `DomainError::DateArithmeticOverflow` if the range runs past the
/// representable calendar.
pub fn date_range_inclusive(start: Date, end: Date) -> Result<Vec<Date>, DomainError> {
    if start > end {
        return Err(DomainError::InvalidRange { start, end });
    }

    let mut dates: Vec<Date> = Vec::new();
    let mut current: Date = start;
    while current <= end {
        dates.push(current);
        if current == end {
            break;
        }
        current = current
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("expanding inclusive date range"),
            })?;
    }
    Ok(dates)
}
