// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Property, RoomType};
use time::Date;

/// Largest allotment (and room type total quantity) the system accepts.
pub const MAX_ALLOTMENT: u32 = 100_000;

/// Largest sold-count change a single increment/decrement may request.
pub const MAX_MUTATION_QUANTITY: u32 = 1_000;

/// Longest inclusive date range the bulk editor accepts, in days.
pub const MAX_RANGE_DAYS: i64 = 1_000;

/// Validates an inclusive date range for bulk operations.
///
/// # Arguments
///
/// * `start` - The first date in the range
/// * `end` - The last date in the range (inclusive)
///
/// # Errors
///
/// Returns `DomainError::InvalidRange` if `start` is after `end`, or
/// `DomainError::RangeTooLarge` if the span exceeds [`MAX_RANGE_DAYS`].
pub fn validate_date_range(start: Date, end: Date) -> Result<(), DomainError> {
    if start > end {
        return Err(DomainError::InvalidRange { start, end });
    }

    let days: i64 = (end - start).whole_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(DomainError::RangeTooLarge {
            days,
            max: MAX_RANGE_DAYS,
        });
    }
    Ok(())
}

/// Validates an explicit date set for mutations and flag toggles.
///
/// # Errors
///
/// Returns `DomainError::EmptyDateSet` if no dates were supplied.
pub fn validate_date_set(dates: &[Date]) -> Result<(), DomainError> {
    if dates.is_empty() {
        return Err(DomainError::EmptyDateSet);
    }
    Ok(())
}

/// Validates a sold-count mutation quantity.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuantity` if the quantity is zero or exceeds
/// [`MAX_MUTATION_QUANTITY`].
pub fn validate_quantity(quantity: u32) -> Result<(), DomainError> {
    if quantity == 0 || quantity > MAX_MUTATION_QUANTITY {
        return Err(DomainError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Validates an allotment value.
///
/// # Errors
///
/// Returns `DomainError::InvalidAllotment` if the value exceeds
/// [`MAX_ALLOTMENT`]. Zero is valid: an allotment of zero is how a date is
/// sold out administratively without flagging it.
pub fn validate_allotment(allotment: u32) -> Result<(), DomainError> {
    if allotment > MAX_ALLOTMENT {
        return Err(DomainError::InvalidAllotment { allotment });
    }
    Ok(())
}

/// Validates a calendar month number.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonth` if the month is outside 1..=12.
pub fn validate_month(month: u8) -> Result<(), DomainError> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::InvalidMonth { month });
    }
    Ok(())
}

/// Validates a min/max stay rule pair as supplied to the bulk editor.
///
/// # Errors
///
/// Returns `DomainError::InvalidStayBounds` if both bounds are present and
/// the minimum exceeds the maximum.
pub fn validate_stay_bounds(
    min_stay: Option<u32>,
    max_stay: Option<u32>,
) -> Result<(), DomainError> {
    if let (Some(min), Some(max)) = (min_stay, max_stay)
        && min > max
    {
        return Err(DomainError::InvalidStayBounds {
            min_stay: min,
            max_stay: max,
        });
    }
    Ok(())
}

/// Validates a property's fields at registration time.
///
/// # Errors
///
/// Returns an error if:
/// - The code is empty
/// - The name is empty
/// - The timezone is not a known IANA zone identifier
pub fn validate_property_fields(property: &Property) -> Result<(), DomainError> {
    if property.code().is_empty() {
        return Err(DomainError::InvalidCode(String::from(
            "Property code cannot be empty",
        )));
    }
    if property.name().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Property name cannot be empty",
        )));
    }
    if property.timezone().parse::<chrono_tz::Tz>().is_err() {
        return Err(DomainError::InvalidTimezone(
            property.timezone().to_string(),
        ));
    }
    Ok(())
}

/// Validates a room type's fields at registration time.
///
/// # Errors
///
/// Returns an error if:
/// - The code is empty
/// - The name is empty
/// - The total quantity is zero or exceeds [`MAX_ALLOTMENT`]
pub fn validate_room_type_fields(room_type: &RoomType) -> Result<(), DomainError> {
    if room_type.code().is_empty() {
        return Err(DomainError::InvalidCode(String::from(
            "Room type code cannot be empty",
        )));
    }
    if room_type.name().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Room type name cannot be empty",
        )));
    }
    if room_type.total_quantity() == 0 || room_type.total_quantity() > MAX_ALLOTMENT {
        return Err(DomainError::InvalidTotalQuantity {
            quantity: room_type.total_quantity(),
        });
    }
    Ok(())
}
