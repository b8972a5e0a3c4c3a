// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use roomledger_domain::{StayRuleViolation, format_iso_date};
use time::Date;

/// API request to register a new property.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterPropertyRequest {
    /// The property code (unique, case-insensitive).
    pub code: String,
    /// The display name.
    pub name: String,
    /// The IANA timezone identifier (e.g., `Europe/Lisbon`).
    pub timezone: String,
}

/// API response for a successful property registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterPropertyResponse {
    /// The canonical numeric identifier.
    pub property_id: i64,
    /// The normalized property code.
    pub code: String,
    /// A success message.
    pub message: String,
}

/// API request to register a new room type within a property.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterRoomTypeRequest {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type code (unique within the property).
    pub code: String,
    /// The display name.
    pub name: String,
    /// The physical room count, used as the default allotment.
    pub total_quantity: u32,
}

/// API response for a successful room type registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterRoomTypeResponse {
    /// The canonical numeric identifier.
    pub room_type_id: i64,
    /// The owning property's identifier.
    pub property_id: i64,
    /// The normalized room type code.
    pub code: String,
    /// A success message.
    pub message: String,
}

/// One day of the inventory calendar as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InventoryDayInfo {
    /// The calendar date.
    pub date: Date,
    /// Sellable capacity for the date.
    pub allotment: u32,
    /// Rooms already sold.
    pub sold: u32,
    /// Rooms still sellable (`allotment - sold`, floored at zero).
    pub available: u32,
    /// Sales halted without closing the date.
    pub stop_sell: bool,
    /// Date closed outright.
    pub closed: bool,
    /// Minimum stay length in nights, if restricted.
    pub min_stay: Option<u32>,
    /// Maximum stay length in nights, if restricted.
    pub max_stay: Option<u32>,
    /// True when `sold` exceeds `allotment`.
    pub oversold: bool,
    /// True when the date is open for sale: not closed, not stop-sell,
    /// and at least one room left.
    pub is_available: bool,
}

impl InventoryDayInfo {
    /// Builds the API view of a ledger record.
    #[must_use]
    pub fn from_record(record: &roomledger_domain::InventoryRecord) -> Self {
        Self {
            date: record.date,
            allotment: record.allotment,
            sold: record.sold,
            available: record.available(),
            stop_sell: record.stop_sell,
            closed: record.closed,
            min_stay: record.min_stay,
            max_stay: record.max_stay,
            oversold: record.is_oversold(),
            is_available: !record.closed && !record.stop_sell && record.available() > 0,
        }
    }
}

/// API request to read the inventory calendar over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetInventoryRequest {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type to read.
    pub room_type_id: i64,
    /// The first date of the range (inclusive).
    pub start_date: Date,
    /// The last date of the range (inclusive).
    pub end_date: Date,
}

/// API response carrying a dense inventory calendar.
///
/// Dates the ledger has never seen are rendered from the room type's
/// default allotment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetInventoryResponse {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type read.
    pub room_type_id: i64,
    /// One entry per date in the requested range, in calendar order.
    pub days: Vec<InventoryDayInfo>,
}

/// API request to evaluate availability for a stay.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CheckAvailabilityRequest {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type to evaluate.
    pub room_type_id: i64,
    /// The check-in date.
    pub check_in: Date,
    /// The check-out date (exclusive; not an occupied night).
    pub check_out: Date,
    /// The number of rooms requested.
    pub rooms_requested: u32,
}

/// API response for an availability evaluation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CheckAvailabilityResponse {
    /// Whether the stay can be sold as requested.
    pub available: bool,
    /// Stay length in nights.
    pub nights: u32,
    /// The largest room count sellable across every occupied date.
    pub rooms_available: u32,
    /// Every occupied date that blocks the stay.
    pub limiting_dates: Vec<Date>,
    /// Advisory stay-length rule violations. These do not affect
    /// `available`.
    pub stay_rule_violations: Vec<StayRuleViolation>,
}

/// API request to adjust the sold count across a set of dates.
///
/// Used for both increments and decrements.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdjustSoldRequest {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type to adjust.
    pub room_type_id: i64,
    /// The dates to adjust. Duplicates are applied once.
    pub dates: Vec<Date>,
    /// The number of rooms to add or remove per date.
    pub quantity: u32,
    /// Optional idempotency key. A repeated key makes the operation a no-op.
    pub idempotency_key: Option<String>,
}

/// API response for a sold count adjustment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdjustSoldResponse {
    /// Existing records whose sold count changed.
    pub modified: usize,
    /// Records materialized by this operation.
    pub created: usize,
    /// Dates where a decrement was clamped at zero (ISO strings).
    pub underflow_dates: Vec<String>,
    /// True when the idempotency key was already recorded and nothing
    /// was applied.
    pub deduplicated: bool,
    /// A success message.
    pub message: String,
}

/// API request to bulk-edit ledger fields over an inclusive date range.
///
/// Only the listed fields can be written; the sold count is never part of
/// a bulk edit. A `min_stay`/`max_stay` of zero clears the rule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkUpdateRequest {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type to edit.
    pub room_type_id: i64,
    /// The first date of the range (inclusive).
    pub start_date: Date,
    /// The last date of the range (inclusive).
    pub end_date: Date,
    /// New sellable capacity, if set.
    pub allotment: Option<u32>,
    /// New stop-sell flag, if set.
    pub stop_sell: Option<bool>,
    /// New closed flag, if set.
    pub closed: Option<bool>,
    /// New minimum stay in nights, if set. Zero clears the rule.
    pub min_stay: Option<u32>,
    /// New maximum stay in nights, if set. Zero clears the rule.
    pub max_stay: Option<u32>,
}

/// API response for a bulk range edit.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkUpdateResponse {
    /// Live records found in the range.
    pub matched: usize,
    /// Records whose stored values actually changed.
    pub modified: usize,
    /// Records created or revived.
    pub upserted: usize,
    /// Dates left with `sold > allotment` after the edit (ISO strings).
    pub oversold_dates: Vec<String>,
    /// A success message.
    pub message: String,
}

/// API request to toggle stop-sell/closed flags on a set of dates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetFlagsRequest {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type to flag.
    pub room_type_id: i64,
    /// The dates to flag.
    pub dates: Vec<Date>,
    /// New stop-sell flag, if set.
    pub stop_sell: Option<bool>,
    /// New closed flag, if set.
    pub closed: Option<bool>,
}

/// API response for a flag toggle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetFlagsResponse {
    /// Records modified or materialized by the toggle.
    pub touched: usize,
    /// A success message.
    pub message: String,
}

/// API request to soft-delete ledger records over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteInventoryRequest {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type to delete from.
    pub room_type_id: i64,
    /// The first date of the range (inclusive).
    pub start_date: Date,
    /// The last date of the range (inclusive).
    pub end_date: Date,
}

/// API response for a soft delete.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteInventoryResponse {
    /// Live records soft-deleted.
    pub deleted: usize,
    /// A success message.
    pub message: String,
}

/// API request to read one calendar month of inventory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetCalendarRequest {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type to read.
    pub room_type_id: i64,
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u8,
}

/// API response carrying one dense month of inventory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetCalendarResponse {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type read.
    pub room_type_id: i64,
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: u8,
    /// One entry per day of the month.
    pub days: Vec<InventoryDayInfo>,
}

/// Formats a date list for success messages.
pub(crate) fn describe_range(start: Date, end: Date) -> String {
    format!("{} through {}", format_iso_date(start), format_iso_date(end))
}
