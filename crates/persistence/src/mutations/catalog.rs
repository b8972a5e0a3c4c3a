// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog mutations: property and room type registration.
//!
//! These are bootstrap operations; the inventory ledger requires both to
//! exist before any record can be scoped or defaulted.

use crate::backend::PersistenceBackend;
use crate::data_models::{NewPropertyRow, NewRoomTypeRow};
use crate::diesel_schema::{properties, room_types};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;

backend_fn! {

/// Registers a property and returns its assigned ID.
///
/// # Errors
///
/// Returns `DuplicateCode` if the code is already registered, or a database
/// error.
pub fn create_property(
    conn: &mut _,
    code: &str,
    name: &str,
    timezone: &str,
) -> Result<i64, PersistenceError> {
    let result = diesel::insert_into(properties::table)
        .values(&NewPropertyRow {
            code: code.to_string(),
            name: name.to_string(),
            timezone: timezone.to_string(),
        })
        .execute(conn);

    match result {
        Ok(_) => conn.get_last_insert_rowid(),
        Err(e) => match PersistenceError::from(e) {
            PersistenceError::UniqueViolation(_) => {
                Err(PersistenceError::DuplicateCode(code.to_string()))
            }
            other => Err(other),
        },
    }
}

}

backend_fn! {

/// Registers a room type under a property and returns its assigned ID.
///
/// # Errors
///
/// Returns `PropertyNotFound` if the property does not exist,
/// `DuplicateCode` if the code is already registered within the property,
/// or a database error.
pub fn create_room_type(
    conn: &mut _,
    property_id: i64,
    code: &str,
    name: &str,
    total_quantity: u32,
) -> Result<i64, PersistenceError> {
    let quantity_i32: i32 = total_quantity.to_i32().ok_or_else(|| {
        PersistenceError::Other(format!("total_quantity out of range: {total_quantity}"))
    })?;

    let result = diesel::insert_into(room_types::table)
        .values(&NewRoomTypeRow {
            property_id,
            code: code.to_string(),
            name: name.to_string(),
            total_quantity: quantity_i32,
        })
        .execute(conn);

    match result {
        Ok(_) => conn.get_last_insert_rowid(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => Err(PersistenceError::PropertyNotFound(property_id)),
        Err(e) => match PersistenceError::from(e) {
            PersistenceError::UniqueViolation(_) => {
                Err(PersistenceError::DuplicateCode(code.to_string()))
            }
            other => Err(other),
        },
    }
}

}
