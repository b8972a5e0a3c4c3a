// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs mapping database tables to and from domain types.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text, booleans as integers, and
//! unsigned counts as checked `i32` columns. Conversion back to domain types
//! fails loudly rather than silently truncating.

use crate::diesel_schema::{inventory_records, ledger_commits, properties, room_types};
use crate::error::PersistenceError;
use diesel::prelude::*;
use roomledger_domain::{InventoryRecord, Property, RoomType, parse_iso_date};

/// A row from the `properties` table.
#[derive(Debug, Clone, Queryable)]
pub struct PropertyRow {
    pub property_id: i64,
    pub code: String,
    pub name: String,
    pub timezone: String,
}

impl PropertyRow {
    /// Converts this row into a domain `Property`.
    #[must_use]
    pub fn to_property(&self) -> Property {
        Property::with_id(self.property_id, &self.code, &self.name, &self.timezone)
    }
}

/// Insertable form of a property.
#[derive(Debug, Insertable)]
#[diesel(table_name = properties)]
pub struct NewPropertyRow {
    pub code: String,
    pub name: String,
    pub timezone: String,
}

/// A row from the `room_types` table.
#[derive(Debug, Clone, Queryable)]
pub struct RoomTypeRow {
    pub room_type_id: i64,
    pub property_id: i64,
    pub code: String,
    pub name: String,
    pub total_quantity: i32,
}

impl RoomTypeRow {
    /// Converts this row into a domain `RoomType`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored quantity is negative.
    pub fn to_room_type(&self) -> Result<RoomType, PersistenceError> {
        let total_quantity: u32 = u32::try_from(self.total_quantity).map_err(|_| {
            PersistenceError::Other(format!(
                "Stored total_quantity out of range: {}",
                self.total_quantity
            ))
        })?;
        Ok(RoomType::with_id(
            self.room_type_id,
            self.property_id,
            &self.code,
            &self.name,
            total_quantity,
        ))
    }
}

/// Insertable form of a room type.
#[derive(Debug, Insertable)]
#[diesel(table_name = room_types)]
pub struct NewRoomTypeRow {
    pub property_id: i64,
    pub code: String,
    pub name: String,
    pub total_quantity: i32,
}

/// A row from the `inventory_records` table.
#[derive(Debug, Clone, Queryable)]
pub struct InventoryRow {
    pub record_id: i64,
    pub property_id: i64,
    pub room_type_id: i64,
    pub date: String,
    pub allotment: i32,
    pub sold: i32,
    pub stop_sell: i32,
    pub closed: i32,
    pub min_stay: Option<i32>,
    pub max_stay: Option<i32>,
    pub deleted_at: Option<String>,
    pub updated_at: Option<String>,
}

impl InventoryRow {
    /// Converts this row into a domain `InventoryRecord`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored date does not parse or a count is
    /// negative.
    pub fn to_record(&self) -> Result<InventoryRecord, PersistenceError> {
        let date = parse_iso_date(&self.date)
            .map_err(|e| PersistenceError::Other(format!("Stored date invalid: {e}")))?;

        let to_u32 = |value: i32, column: &str| -> Result<u32, PersistenceError> {
            u32::try_from(value).map_err(|_| {
                PersistenceError::Other(format!("Stored {column} out of range: {value}"))
            })
        };

        Ok(InventoryRecord {
            property_id: self.property_id,
            room_type_id: self.room_type_id,
            date,
            allotment: to_u32(self.allotment, "allotment")?,
            sold: to_u32(self.sold, "sold")?,
            stop_sell: self.stop_sell != 0,
            closed: self.closed != 0,
            min_stay: self.min_stay.map(|v| to_u32(v, "min_stay")).transpose()?,
            max_stay: self.max_stay.map(|v| to_u32(v, "max_stay")).transpose()?,
        })
    }
}

/// Insertable form of an inventory record.
#[derive(Debug, Insertable)]
#[diesel(table_name = inventory_records)]
pub struct NewInventoryRow {
    pub property_id: i64,
    pub room_type_id: i64,
    pub date: String,
    pub allotment: i32,
    pub sold: i32,
    pub stop_sell: i32,
    pub closed: i32,
    pub min_stay: Option<i32>,
    pub max_stay: Option<i32>,
    pub updated_at: Option<String>,
}

/// Insertable form of an idempotency commit-log entry.
#[derive(Debug, Insertable)]
#[diesel(table_name = ledger_commits)]
pub struct NewLedgerCommit {
    pub commit_key: String,
    pub operation: String,
    pub property_id: i64,
    pub room_type_id: i64,
    pub quantity: i32,
    pub dates_json: String,
    pub created_at: String,
}
