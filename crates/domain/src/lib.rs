// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod calendar;
mod dates;
mod error;
mod stay_rules;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{AvailabilityResult, evaluate_availability};
pub use calendar::month_dates;
pub use dates::{date_range_inclusive, format_iso_date, parse_iso_date};
pub use error::DomainError;
pub use stay_rules::{StayRule, StayRuleViolation, stay_length_violations};
pub use types::{InventoryRecord, Property, RoomType, StayRequest};
pub use validation::{
    MAX_ALLOTMENT, MAX_MUTATION_QUANTITY, MAX_RANGE_DAYS, validate_allotment, validate_date_range,
    validate_date_set, validate_month, validate_property_fields, validate_quantity,
    validate_room_type_fields, validate_stay_bounds,
};
