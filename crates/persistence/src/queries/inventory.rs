// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory ledger queries.
//!
//! Soft-deleted records are filtered out of every query here; they are
//! invisible to reads and availability until a write revives them.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text, so lexicographic comparison
//! and calendar comparison agree.

use crate::data_models::InventoryRow;
use crate::diesel_schema::inventory_records;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Loads every live record for a room type within an inclusive date range,
/// ordered by date.
///
/// Sparse dates simply have no row; the caller fills in defaults.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn records_in_range(
    conn: &mut _,
    property_id: i64,
    room_type_id: i64,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<InventoryRow>, PersistenceError> {
    inventory_records::table
        .filter(inventory_records::property_id.eq(property_id))
        .filter(inventory_records::room_type_id.eq(room_type_id))
        .filter(inventory_records::date.ge(start_date))
        .filter(inventory_records::date.le(end_date))
        .filter(inventory_records::deleted_at.is_null())
        .order(inventory_records::date.asc())
        .load::<InventoryRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Loads every live record for a room type matching an explicit date set,
/// ordered by date.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn records_for_dates(
    conn: &mut _,
    property_id: i64,
    room_type_id: i64,
    dates: &[String],
) -> Result<Vec<InventoryRow>, PersistenceError> {
    inventory_records::table
        .filter(inventory_records::property_id.eq(property_id))
        .filter(inventory_records::room_type_id.eq(room_type_id))
        .filter(inventory_records::date.eq_any(dates))
        .filter(inventory_records::deleted_at.is_null())
        .order(inventory_records::date.asc())
        .load::<InventoryRow>(conn)
        .map_err(Into::into)
}

}
