// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog queries: property and room type lookups.
//!
//! All queries are generated in backend-specific monomorphic versions
//! (`_sqlite` and `_mysql` suffixes) using the `backend_fn!` macro.

use crate::data_models::{PropertyRow, RoomTypeRow};
use crate::diesel_schema::{properties, room_types};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Fetches a property by ID.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn get_property(
    conn: &mut _,
    property_id: i64,
) -> Result<Option<PropertyRow>, PersistenceError> {
    properties::table
        .filter(properties::property_id.eq(property_id))
        .first::<PropertyRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// Fetches a room type by ID.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn get_room_type(
    conn: &mut _,
    room_type_id: i64,
) -> Result<Option<RoomTypeRow>, PersistenceError> {
    room_types::table
        .filter(room_types::room_type_id.eq(room_type_id))
        .first::<RoomTypeRow>(conn)
        .optional()
        .map_err(Into::into)
}

}
