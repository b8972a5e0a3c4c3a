// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod inventory_tests;

use crate::Persistence;
use roomledger_domain::{Property, RoomType};
use time::Date;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Seeds one property with one room type and returns their IDs.
pub fn seed_catalog(persistence: &mut Persistence, total_quantity: u32) -> (i64, i64) {
    let property_id = persistence
        .create_property(&Property::new("GRAND-01", "Grand Hotel", "Europe/Lisbon"))
        .expect("Failed to create test property");
    let room_type_id = persistence
        .create_room_type(&RoomType::new(
            property_id,
            "DBL",
            "Double Room",
            total_quantity,
        ))
        .expect("Failed to create test room type");
    (property_id, room_type_id)
}

/// A date in July 2026, the fixture month for ledger tests.
pub fn july(day: u8) -> Date {
    Date::from_calendar_date(2026, time::Month::July, day).expect("Valid test date")
}
