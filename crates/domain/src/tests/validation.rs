// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::error::DomainError;
use crate::types::{Property, RoomType};
use crate::validation::{
    MAX_ALLOTMENT, MAX_MUTATION_QUANTITY, MAX_RANGE_DAYS, validate_allotment, validate_date_range,
    validate_date_set, validate_month, validate_property_fields, validate_quantity,
    validate_room_type_fields, validate_stay_bounds,
};
use time::macros::date;

#[test]
fn test_date_range_accepts_single_day() {
    assert!(validate_date_range(date!(2026 - 07 - 10), date!(2026 - 07 - 10)).is_ok());
}

#[test]
fn test_date_range_rejects_inverted() {
    let result = validate_date_range(date!(2026 - 07 - 11), date!(2026 - 07 - 10));
    assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
}

#[test]
fn test_date_range_rejects_excessive_span() {
    let start = date!(2026 - 01 - 01);
    let end = date!(2029 - 01 - 01);
    let result = validate_date_range(start, end);
    assert!(matches!(
        result,
        Err(DomainError::RangeTooLarge { max: MAX_RANGE_DAYS, .. })
    ));
}

#[test]
fn test_date_set_rejects_empty() {
    assert!(matches!(
        validate_date_set(&[]),
        Err(DomainError::EmptyDateSet)
    ));
    assert!(validate_date_set(&[date!(2026 - 07 - 10)]).is_ok());
}

#[test]
fn test_quantity_bounds() {
    assert!(matches!(
        validate_quantity(0),
        Err(DomainError::InvalidQuantity { quantity: 0 })
    ));
    assert!(validate_quantity(1).is_ok());
    assert!(validate_quantity(MAX_MUTATION_QUANTITY).is_ok());
    assert!(validate_quantity(MAX_MUTATION_QUANTITY + 1).is_err());
}

#[test]
fn test_allotment_zero_is_valid() {
    assert!(validate_allotment(0).is_ok());
    assert!(validate_allotment(MAX_ALLOTMENT).is_ok());
    assert!(validate_allotment(MAX_ALLOTMENT + 1).is_err());
}

#[test]
fn test_month_bounds() {
    assert!(validate_month(1).is_ok());
    assert!(validate_month(12).is_ok());
    assert!(matches!(
        validate_month(0),
        Err(DomainError::InvalidMonth { month: 0 })
    ));
    assert!(validate_month(13).is_err());
}

#[test]
fn test_stay_bounds_min_over_max_rejected() {
    let result = validate_stay_bounds(Some(5), Some(3));
    assert!(matches!(
        result,
        Err(DomainError::InvalidStayBounds {
            min_stay: 5,
            max_stay: 3,
        })
    ));
}

#[test]
fn test_stay_bounds_partial_pairs_accepted() {
    assert!(validate_stay_bounds(Some(3), None).is_ok());
    assert!(validate_stay_bounds(None, Some(7)).is_ok());
    assert!(validate_stay_bounds(Some(3), Some(3)).is_ok());
    assert!(validate_stay_bounds(None, None).is_ok());
}

#[test]
fn test_property_fields_valid() {
    let property = Property::new("GRAND-01", "Grand Hotel", "Europe/Lisbon");
    assert!(validate_property_fields(&property).is_ok());
}

#[test]
fn test_property_rejects_empty_code() {
    let property = Property::new("", "Grand Hotel", "Europe/Lisbon");
    assert!(matches!(
        validate_property_fields(&property),
        Err(DomainError::InvalidCode(_))
    ));
}

#[test]
fn test_property_rejects_unknown_timezone() {
    let property = Property::new("GRAND-01", "Grand Hotel", "Mars/Olympus_Mons");
    assert!(matches!(
        validate_property_fields(&property),
        Err(DomainError::InvalidTimezone(_))
    ));
}

#[test]
fn test_room_type_fields_valid() {
    let room_type = RoomType::new(1, "DBL", "Double Room", 20);
    assert!(validate_room_type_fields(&room_type).is_ok());
}

#[test]
fn test_room_type_rejects_zero_quantity() {
    let room_type = RoomType::new(1, "DBL", "Double Room", 0);
    assert!(matches!(
        validate_room_type_fields(&room_type),
        Err(DomainError::InvalidTotalQuantity { quantity: 0 })
    ));
}

#[test]
fn test_room_type_rejects_empty_name() {
    let room_type = RoomType::new(1, "DBL", "", 20);
    assert!(matches!(
        validate_room_type_fields(&room_type),
        Err(DomainError::InvalidName(_))
    ));
}
