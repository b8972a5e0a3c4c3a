// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stay availability calculation.
//!
//! This module provides a read-only evaluation of a stay request against
//! ledger records. It is advisory: the authoritative check happens inside the
//! allotment mutator's transaction.

use crate::error::DomainError;
use crate::types::{InventoryRecord, StayRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Result of evaluating a stay request against the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// Whether the stay can be sold as requested.
    pub available: bool,
    /// Every occupied date that blocks the stay, in calendar order.
    /// Empty when `available` is true.
    pub limiting_dates: Vec<Date>,
    /// Stay length in nights.
    pub nights: u32,
    /// The largest room count sellable across every occupied date.
    /// Zero when any date is closed or stop-sold.
    pub rooms_available: u32,
}

/// Evaluates a stay request against the ledger records covering its dates.
///
/// The ledger is sparse: any occupied date missing from `records` behaves as
/// a fresh record with `default_allotment` capacity, nothing sold, and no
/// flags. A date blocks the stay when it is closed, stop-sold, or has fewer
/// rooms available than requested. Every blocking date is reported, not just
/// the first.
///
/// Stay-length rules (`min_stay`/`max_stay`) are deliberately not part of
/// this verdict; see [`crate::stay_length_violations`].
///
/// # Arguments
///
/// * `stay` - The validated stay request
/// * `records` - Ledger records keyed by date, covering any subset of the stay
/// * `default_allotment` - The room type's `total_quantity`
///
/// # Returns
///
/// An [`AvailabilityResult`] with the verdict, all limiting dates, the stay
/// length, and the sellable room count.
///
/// # Errors
///
/// Returns an error if the occupied dates cannot be enumerated.
pub fn evaluate_availability(
    stay: &StayRequest,
    records: &BTreeMap<Date, InventoryRecord>,
    default_allotment: u32,
) -> Result<AvailabilityResult, DomainError> {
    let mut limiting_dates: Vec<Date> = Vec::new();
    let mut rooms_available: u32 = u32::MAX;

    for date in stay.occupied_dates()? {
        let (available, flagged): (u32, bool) = records.get(&date).map_or_else(
            || (default_allotment, false),
            |record| (record.available(), record.closed || record.stop_sell),
        );

        let sellable: u32 = if flagged { 0 } else { available };
        rooms_available = rooms_available.min(sellable);

        if flagged || available < stay.rooms_requested() {
            limiting_dates.push(date);
        }
    }

    Ok(AvailabilityResult {
        available: limiting_dates.is_empty(),
        limiting_dates,
        nights: stay.nights(),
        rooms_available,
    })
}
