// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// Represents a property (a hotel) in the catalog.
///
/// Properties exist so room types have an owner and so inventory records can
/// be scoped. The timezone identifier records the property's local calendar
/// convention; no timezone arithmetic is performed on inventory dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the property has not been persisted yet.
    property_id: Option<i64>,
    /// Short unique code (e.g., "GRAND-01").
    code: String,
    /// Display name.
    name: String,
    /// IANA timezone identifier (e.g., "Europe/Lisbon").
    timezone: String,
}

// Two properties are the same property if they share a code, regardless of
// whether either has been persisted yet.
impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Property {}

impl Property {
    /// Creates a new `Property` without a persisted ID.
    ///
    /// The code is normalized to uppercase so lookups are case-insensitive.
    #[must_use]
    pub fn new(code: &str, name: &str, timezone: &str) -> Self {
        Self {
            property_id: None,
            code: code.to_uppercase(),
            name: name.to_string(),
            timezone: timezone.to_string(),
        }
    }

    /// Creates a `Property` with an existing persisted ID.
    #[must_use]
    pub fn with_id(property_id: i64, code: &str, name: &str, timezone: &str) -> Self {
        Self {
            property_id: Some(property_id),
            code: code.to_uppercase(),
            name: name.to_string(),
            timezone: timezone.to_string(),
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn property_id(&self) -> Option<i64> {
        self.property_id
    }

    /// Returns the property code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the IANA timezone identifier.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

/// Represents a bookable room type within a property.
///
/// The `total_quantity` is the physical room count and serves as the default
/// allotment for any date the ledger has no record for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    /// The canonical numeric identifier assigned by the database.
    room_type_id: Option<i64>,
    /// The owning property's identifier.
    property_id: i64,
    /// Short code unique within the property (e.g., "DBL").
    code: String,
    /// Display name.
    name: String,
    /// Physical room count; the default allotment for unwritten dates.
    total_quantity: u32,
}

impl PartialEq for RoomType {
    fn eq(&self, other: &Self) -> bool {
        self.property_id == other.property_id && self.code == other.code
    }
}

impl Eq for RoomType {}

impl RoomType {
    /// Creates a new `RoomType` without a persisted ID.
    #[must_use]
    pub fn new(property_id: i64, code: &str, name: &str, total_quantity: u32) -> Self {
        Self {
            room_type_id: None,
            property_id,
            code: code.to_uppercase(),
            name: name.to_string(),
            total_quantity,
        }
    }

    /// Creates a `RoomType` with an existing persisted ID.
    #[must_use]
    pub fn with_id(
        room_type_id: i64,
        property_id: i64,
        code: &str,
        name: &str,
        total_quantity: u32,
    ) -> Self {
        Self {
            room_type_id: Some(room_type_id),
            property_id,
            code: code.to_uppercase(),
            name: name.to_string(),
            total_quantity,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn room_type_id(&self) -> Option<i64> {
        self.room_type_id
    }

    /// Returns the owning property's identifier.
    #[must_use]
    pub const fn property_id(&self) -> i64 {
        self.property_id
    }

    /// Returns the room type code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the physical room count.
    #[must_use]
    pub const fn total_quantity(&self) -> u32 {
        self.total_quantity
    }
}

/// A single (room type, date) inventory ledger entry.
///
/// The ledger is sparse: a date with no record behaves exactly like
/// [`InventoryRecord::from_default`] built from the room type's
/// `total_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// The owning property's identifier.
    pub property_id: i64,
    /// The room type this entry belongs to.
    pub room_type_id: i64,
    /// The calendar date this entry covers.
    pub date: Date,
    /// Sellable capacity for the date.
    pub allotment: u32,
    /// Rooms already sold for the date.
    pub sold: u32,
    /// Sales halted without closing the date.
    pub stop_sell: bool,
    /// Date closed outright (maintenance, seasonal closure).
    pub closed: bool,
    /// Minimum stay length in nights, if restricted.
    pub min_stay: Option<u32>,
    /// Maximum stay length in nights, if restricted.
    pub max_stay: Option<u32>,
}

impl InventoryRecord {
    /// Creates a record as it behaves for a date the ledger has never seen:
    /// full default allotment, nothing sold, no flags, no stay rules.
    #[must_use]
    pub const fn from_default(
        property_id: i64,
        room_type_id: i64,
        date: Date,
        default_allotment: u32,
    ) -> Self {
        Self {
            property_id,
            room_type_id,
            date,
            allotment: default_allotment,
            sold: 0,
            stop_sell: false,
            closed: false,
            min_stay: None,
            max_stay: None,
        }
    }

    /// Rooms still sellable for this date.
    ///
    /// Saturates at zero when the record is oversold.
    #[must_use]
    pub const fn available(&self) -> u32 {
        self.allotment.saturating_sub(self.sold)
    }

    /// Whether more rooms have been sold than the allotment permits.
    ///
    /// Oversold records can only arise through administrative allotment
    /// reductions; the mutator never creates them.
    #[must_use]
    pub const fn is_oversold(&self) -> bool {
        self.sold > self.allotment
    }

    /// Whether this date blocks a stay needing `rooms_requested` rooms.
    #[must_use]
    pub const fn blocks(&self, rooms_requested: u32) -> bool {
        self.closed || self.stop_sell || self.available() < rooms_requested
    }
}

/// A validated stay request: `[check_in, check_out)` with check-out exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRequest {
    check_in: Date,
    check_out: Date,
    rooms_requested: u32,
    nights: u32,
}

impl StayRequest {
    /// Creates a validated `StayRequest`.
    ///
    /// # Arguments
    ///
    /// * `check_in` - The arrival date (first occupied night)
    /// * `check_out` - The departure date (never occupied)
    /// * `rooms_requested` - How many rooms the stay needs
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStayRange` if `check_in` is not strictly
    /// before `check_out` (zero-night stays are invalid), or
    /// `DomainError::InvalidQuantity` if `rooms_requested` is zero.
    pub fn new(check_in: Date, check_out: Date, rooms_requested: u32) -> Result<Self, DomainError> {
        if check_in >= check_out {
            return Err(DomainError::InvalidStayRange {
                check_in,
                check_out,
            });
        }
        if rooms_requested == 0 {
            return Err(DomainError::InvalidQuantity { quantity: 0 });
        }

        let span: i64 = (check_out - check_in).whole_days();
        let nights: u32 =
            u32::try_from(span).map_err(|_| DomainError::DateArithmeticOverflow {
                operation: String::from("computing stay length"),
            })?;

        Ok(Self {
            check_in,
            check_out,
            rooms_requested,
            nights,
        })
    }

    /// Returns the arrival date.
    #[must_use]
    pub const fn check_in(&self) -> Date {
        self.check_in
    }

    /// Returns the departure date (exclusive).
    #[must_use]
    pub const fn check_out(&self) -> Date {
        self.check_out
    }

    /// Returns the number of rooms the stay needs.
    #[must_use]
    pub const fn rooms_requested(&self) -> u32 {
        self.rooms_requested
    }

    /// Returns the stay length in nights.
    #[must_use]
    pub const fn nights(&self) -> u32 {
        self.nights
    }

    /// Returns the ordered occupied dates: every night from `check_in` up to
    /// but excluding `check_out`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the stay runs past
    /// the representable calendar.
    pub fn occupied_dates(&self) -> Result<Vec<Date>, DomainError> {
        let mut dates: Vec<Date> = Vec::with_capacity(self.nights as usize);
        let mut current: Date = self.check_in;
        while current < self.check_out {
            dates.push(current);
            current = current
                .next_day()
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: String::from("iterating occupied stay dates"),
                })?;
        }
        Ok(dates)
    }
}
