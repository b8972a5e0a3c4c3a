// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for API tests.

use roomledger_persistence::SqlitePersistence;
use time::Date;

use crate::handlers::{register_property, register_room_type};
use crate::request_response::{RegisterPropertyRequest, RegisterRoomTypeRequest};

/// Creates an in-memory persistence instance for tests.
pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Registers a property and a room type through the API handlers and
/// returns their IDs.
pub fn seed_catalog(persistence: &mut SqlitePersistence, total_quantity: u32) -> (i64, i64) {
    let property = register_property(
        persistence,
        RegisterPropertyRequest {
            code: String::from("grand-01"),
            name: String::from("Grand Hotel"),
            timezone: String::from("Europe/Lisbon"),
        },
    )
    .expect("Failed to register test property");

    let room_type = register_room_type(
        persistence,
        RegisterRoomTypeRequest {
            property_id: property.property_id,
            code: String::from("dbl"),
            name: String::from("Double Room"),
            total_quantity,
        },
    )
    .expect("Failed to register test room type");

    (property.property_id, room_type.room_type_id)
}

/// A date in July 2026, the fixture month for API tests.
pub fn july(day: u8) -> Date {
    Date::from_calendar_date(2026, time::Month::July, day).expect("Valid test date")
}
