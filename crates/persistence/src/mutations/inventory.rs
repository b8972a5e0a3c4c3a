// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory ledger mutations.
//!
//! Sold-count increments and decrements, bulk range edits, flag toggles, and
//! soft deletes. Every operation runs inside a transaction and re-validates
//! against current rows, so the advisory availability check can never be the
//! last word on capacity.
//!
//! All functions are generated in backend-specific monomorphic versions
//! (`_sqlite` and `_mysql` suffixes) using the `backend_fn!` macro.

use crate::data_models::{NewInventoryRow, NewLedgerCommit};
use crate::diesel_schema::{inventory_records, ledger_commits};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;
use tracing::{info, warn};

/// Outcome of an increment or decrement operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Existing records whose sold count changed.
    pub modified: usize,
    /// Records materialized by this operation.
    pub created: usize,
    /// Dates where a decrement was clamped at zero, as ISO strings.
    pub underflow_dates: Vec<String>,
    /// True when the idempotency key was already recorded and the
    /// operation was skipped.
    pub deduplicated: bool,
}

impl CommitOutcome {
    const fn replayed() -> Self {
        Self {
            modified: 0,
            created: 0,
            underflow_dates: Vec::new(),
            deduplicated: true,
        }
    }
}

/// Outcome of a bulk range update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUpdateOutcome {
    /// Live records found in the range.
    pub matched: usize,
    /// Records whose stored values actually changed.
    pub modified: usize,
    /// Records created (or revived from soft deletion).
    pub upserted: usize,
    /// Dates left with `sold > allotment` after the edit, as ISO strings.
    pub oversold_dates: Vec<String>,
}

/// Allow-listed fields for bulk range edits.
///
/// `sold` is deliberately absent: sold counts change only through the
/// increment/decrement operations. A stay-rule field of `Some(0)` clears the
/// stored rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFields {
    pub allotment: Option<u32>,
    pub stop_sell: Option<bool>,
    pub closed: Option<bool>,
    pub min_stay: Option<u32>,
    pub max_stay: Option<u32>,
}

impl InventoryFields {
    /// Whether the edit carries at least one field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.allotment.is_none()
            && self.stop_sell.is_none()
            && self.closed.is_none()
            && self.min_stay.is_none()
            && self.max_stay.is_none()
    }
}

/// Planned write for a single date within a sold-count mutation.
///
/// The plan is built from a snapshot read; the writes themselves are
/// guarded against the current committed row so a stale snapshot can never
/// admit an overbooking.
enum SoldPlan {
    Update { record_id: i64, date: String },
    Revive { record_id: i64, date: String },
    Insert { date: String },
}

/// Current timestamp as an RFC 3339 string for `updated_at`/`created_at`.
fn now_timestamp() -> Result<String, PersistenceError> {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

/// Checked u32 to i32 narrowing for SQL integer columns.
fn to_i32(value: u32, what: &str) -> Result<i32, PersistenceError> {
    value
        .to_i32()
        .ok_or_else(|| PersistenceError::Other(format!("{what} out of range: {value}")))
}

/// Sorted, deduplicated copy of the requested dates.
///
/// A duplicate date in a request must not double-apply the quantity.
fn normalize_dates(dates: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = dates.to_vec();
    normalized.sort();
    normalized.dedup();
    normalized
}

backend_fn! {

/// Atomically increments the sold count across a set of dates.
///
/// Records are materialized with the default allotment on first touch.
/// Every date is re-validated inside the transaction; if any date would end
/// with `sold > allotment` the whole operation fails with
/// [`PersistenceError::OverAllotment`] naming every blocking date, and no
/// date is modified.
///
/// With `commit_key` set, a replayed key makes the operation a no-op
/// reported as `deduplicated`.
///
/// # Errors
///
/// Returns `OverAllotment` if any date lacks capacity, `Busy` on lock
/// contention, or a database error.
#[allow(clippy::too_many_lines)]
pub fn increment_sold(
    conn: &mut _,
    property_id: i64,
    room_type_id: i64,
    dates: &[String],
    quantity: u32,
    default_allotment: u32,
    commit_key: Option<&str>,
) -> Result<CommitOutcome, PersistenceError> {
    let quantity_i32: i32 = to_i32(quantity, "quantity")?;
    let default_i32: i32 = to_i32(default_allotment, "default allotment")?;
    let dates: Vec<String> = normalize_dates(dates);

    conn.transaction(|conn| {
        if let Some(key) = commit_key {
            let seen: i64 = ledger_commits::table
                .filter(ledger_commits::commit_key.eq(key))
                .count()
                .get_result(conn)?;
            if seen > 0 {
                info!(commit_key = key, "Skipping replayed increment commit");
                return Ok(CommitOutcome::replayed());
            }
            diesel::insert_into(ledger_commits::table)
                .values(&NewLedgerCommit {
                    commit_key: key.to_string(),
                    operation: String::from("increment_sold"),
                    property_id,
                    room_type_id,
                    quantity: quantity_i32,
                    dates_json: serde_json::to_string(&dates)?,
                    created_at: now_timestamp()?,
                })
                .execute(conn)?;
        }

        // Validation pass: plan every write, collecting all blocking dates
        // so the caller sees the full picture, not just the first breach.
        let mut plan: Vec<SoldPlan> = Vec::with_capacity(dates.len());
        let mut blocked: Vec<String> = Vec::new();

        for date in &dates {
            let existing: Option<(i64, i32, i32, Option<String>)> = inventory_records::table
                .select((
                    inventory_records::record_id,
                    inventory_records::allotment,
                    inventory_records::sold,
                    inventory_records::deleted_at,
                ))
                .filter(inventory_records::property_id.eq(property_id))
                .filter(inventory_records::room_type_id.eq(room_type_id))
                .filter(inventory_records::date.eq(date))
                .first(conn)
                .optional()?;

            match existing {
                Some((record_id, allotment, sold, None)) => {
                    if sold + quantity_i32 > allotment {
                        blocked.push(date.clone());
                    } else {
                        plan.push(SoldPlan::Update {
                            record_id,
                            date: date.clone(),
                        });
                    }
                }
                // Soft-deleted rows behave as unwritten dates but must be
                // revived in place to respect the unique date constraint.
                Some((record_id, _, _, Some(_))) => {
                    if quantity_i32 > default_i32 {
                        blocked.push(date.clone());
                    } else {
                        plan.push(SoldPlan::Revive {
                            record_id,
                            date: date.clone(),
                        });
                    }
                }
                None => {
                    if quantity_i32 > default_i32 {
                        blocked.push(date.clone());
                    } else {
                        plan.push(SoldPlan::Insert { date: date.clone() });
                    }
                }
            }
        }

        if !blocked.is_empty() {
            return Err(PersistenceError::OverAllotment { dates: blocked });
        }

        let stamp: String = now_timestamp()?;
        let mut modified: usize = 0;
        let mut created: usize = 0;

        for step in plan {
            match step {
                SoldPlan::Update { record_id, date } => {
                    // The capacity check is part of the UPDATE itself and
                    // evaluates against the current committed row. The
                    // snapshot read above does not lock on MySQL, so a
                    // concurrent increment committed since then would be
                    // invisible to it; a zero affected-row count here means
                    // the date filled up and the whole operation rolls back.
                    let affected: usize = diesel::update(
                        inventory_records::table
                            .filter(inventory_records::record_id.eq(record_id))
                            .filter(
                                inventory_records::sold
                                    .le(inventory_records::allotment - quantity_i32),
                            ),
                    )
                    .set((
                        inventory_records::sold.eq(inventory_records::sold + quantity_i32),
                        inventory_records::updated_at.eq(Some(stamp.clone())),
                    ))
                    .execute(conn)?;
                    if affected == 0 {
                        return Err(PersistenceError::OverAllotment {
                            dates: vec![date],
                        });
                    }
                    modified += 1;
                }
                SoldPlan::Revive { record_id, date } => {
                    let affected: usize = diesel::update(
                        inventory_records::table
                            .filter(inventory_records::record_id.eq(record_id))
                            .filter(inventory_records::deleted_at.is_not_null()),
                    )
                    .set((
                        inventory_records::allotment.eq(default_i32),
                        inventory_records::sold.eq(quantity_i32),
                        inventory_records::stop_sell.eq(0),
                        inventory_records::closed.eq(0),
                        inventory_records::min_stay.eq(None::<i32>),
                        inventory_records::max_stay.eq(None::<i32>),
                        inventory_records::deleted_at.eq(None::<String>),
                        inventory_records::updated_at.eq(Some(stamp.clone())),
                    ))
                    .execute(conn)?;
                    if affected == 0 {
                        // The row was revived by a concurrent writer since
                        // the snapshot read; treat it as a live record and
                        // apply the guarded increment instead.
                        let applied: usize = diesel::update(
                            inventory_records::table
                                .filter(inventory_records::record_id.eq(record_id))
                                .filter(
                                    inventory_records::sold
                                        .le(inventory_records::allotment - quantity_i32),
                                ),
                        )
                        .set((
                            inventory_records::sold
                                .eq(inventory_records::sold + quantity_i32),
                            inventory_records::updated_at.eq(Some(stamp.clone())),
                        ))
                        .execute(conn)?;
                        if applied == 0 {
                            return Err(PersistenceError::OverAllotment {
                                dates: vec![date],
                            });
                        }
                        modified += 1;
                    } else {
                        created += 1;
                    }
                }
                SoldPlan::Insert { date } => {
                    // A concurrent insert of the same date trips the unique
                    // constraint and aborts the transaction.
                    diesel::insert_into(inventory_records::table)
                        .values(&NewInventoryRow {
                            property_id,
                            room_type_id,
                            date,
                            allotment: default_i32,
                            sold: quantity_i32,
                            stop_sell: 0,
                            closed: 0,
                            min_stay: None,
                            max_stay: None,
                            updated_at: Some(stamp.clone()),
                        })
                        .execute(conn)?;
                    created += 1;
                }
            }
        }

        Ok(CommitOutcome {
            modified,
            created,
            underflow_dates: Vec::new(),
            deduplicated: false,
        })
    })
}

}

backend_fn! {

/// Atomically decrements the sold count across a set of dates.
///
/// Cancellations are never rejected for capacity reasons: any date whose
/// sold count would drop below zero is clamped at zero and reported in
/// `underflow_dates`. Unwritten and soft-deleted dates are materialized with
/// a zero sold count and also reported as underflow.
///
/// With `commit_key` set, a replayed key makes the operation a no-op
/// reported as `deduplicated`.
///
/// # Errors
///
/// Returns `Busy` on lock contention, or a database error.
#[allow(clippy::too_many_lines)]
pub fn decrement_sold(
    conn: &mut _,
    property_id: i64,
    room_type_id: i64,
    dates: &[String],
    quantity: u32,
    default_allotment: u32,
    commit_key: Option<&str>,
) -> Result<CommitOutcome, PersistenceError> {
    let quantity_i32: i32 = to_i32(quantity, "quantity")?;
    let default_i32: i32 = to_i32(default_allotment, "default allotment")?;
    let dates: Vec<String> = normalize_dates(dates);

    conn.transaction(|conn| {
        if let Some(key) = commit_key {
            let seen: i64 = ledger_commits::table
                .filter(ledger_commits::commit_key.eq(key))
                .count()
                .get_result(conn)?;
            if seen > 0 {
                info!(commit_key = key, "Skipping replayed decrement commit");
                return Ok(CommitOutcome::replayed());
            }
            diesel::insert_into(ledger_commits::table)
                .values(&NewLedgerCommit {
                    commit_key: key.to_string(),
                    operation: String::from("decrement_sold"),
                    property_id,
                    room_type_id,
                    quantity: quantity_i32,
                    dates_json: serde_json::to_string(&dates)?,
                    created_at: now_timestamp()?,
                })
                .execute(conn)?;
        }

        let stamp: String = now_timestamp()?;
        let mut modified: usize = 0;
        let mut created: usize = 0;
        let mut underflow_dates: Vec<String> = Vec::new();

        for date in &dates {
            let existing: Option<(i64, i32, Option<String>)> = inventory_records::table
                .select((
                    inventory_records::record_id,
                    inventory_records::sold,
                    inventory_records::deleted_at,
                ))
                .filter(inventory_records::property_id.eq(property_id))
                .filter(inventory_records::room_type_id.eq(room_type_id))
                .filter(inventory_records::date.eq(date))
                .first(conn)
                .optional()?;

            match existing {
                Some((record_id, sold, None)) => {
                    // Relative decrement guarded on the current committed
                    // value; a stale snapshot read can never lose a
                    // concurrent writer's update.
                    let affected: usize = diesel::update(
                        inventory_records::table
                            .filter(inventory_records::record_id.eq(record_id))
                            .filter(inventory_records::sold.ge(quantity_i32)),
                    )
                    .set((
                        inventory_records::sold.eq(inventory_records::sold - quantity_i32),
                        inventory_records::updated_at.eq(Some(stamp.clone())),
                    ))
                    .execute(conn)?;
                    if affected == 0 {
                        warn!(
                            date = %date,
                            sold,
                            quantity = quantity_i32,
                            "Decrement below zero clamped"
                        );
                        underflow_dates.push(date.clone());
                        diesel::update(
                            inventory_records::table
                                .filter(inventory_records::record_id.eq(record_id)),
                        )
                        .set((
                            inventory_records::sold.eq(0),
                            inventory_records::updated_at.eq(Some(stamp.clone())),
                        ))
                        .execute(conn)?;
                    }
                    modified += 1;
                }
                Some((record_id, _, Some(_))) => {
                    warn!(date = %date, "Decrement against deleted record clamped");
                    underflow_dates.push(date.clone());
                    diesel::update(
                        inventory_records::table
                            .filter(inventory_records::record_id.eq(record_id)),
                    )
                    .set((
                        inventory_records::allotment.eq(default_i32),
                        inventory_records::sold.eq(0),
                        inventory_records::stop_sell.eq(0),
                        inventory_records::closed.eq(0),
                        inventory_records::min_stay.eq(None::<i32>),
                        inventory_records::max_stay.eq(None::<i32>),
                        inventory_records::deleted_at.eq(None::<String>),
                        inventory_records::updated_at.eq(Some(stamp.clone())),
                    ))
                    .execute(conn)?;
                    created += 1;
                }
                None => {
                    warn!(date = %date, "Decrement against unwritten date clamped");
                    underflow_dates.push(date.clone());
                    diesel::insert_into(inventory_records::table)
                        .values(&NewInventoryRow {
                            property_id,
                            room_type_id,
                            date: date.clone(),
                            allotment: default_i32,
                            sold: 0,
                            stop_sell: 0,
                            closed: 0,
                            min_stay: None,
                            max_stay: None,
                            updated_at: Some(stamp.clone()),
                        })
                        .execute(conn)?;
                    created += 1;
                }
            }
        }

        Ok(CommitOutcome {
            modified,
            created,
            underflow_dates,
            deduplicated: false,
        })
    })
}

}

backend_fn! {

/// Applies allow-listed fields to every date in an expanded inclusive range.
///
/// Existing live records are merged field by field; unwritten dates are
/// created from the default allotment overlaid with the supplied fields;
/// soft-deleted records are revived the same way with a zero sold count.
///
/// Setting the allotment below a record's sold count is permitted, but every
/// such date is reported in `oversold_dates` and logged.
///
/// # Errors
///
/// Returns `Busy` on lock contention, or a database error.
#[allow(clippy::too_many_lines)]
pub fn bulk_update(
    conn: &mut _,
    property_id: i64,
    room_type_id: i64,
    dates: &[String],
    fields: &InventoryFields,
    default_allotment: u32,
) -> Result<BulkUpdateOutcome, PersistenceError> {
    let default_i32: i32 = to_i32(default_allotment, "default allotment")?;
    let new_allotment: Option<i32> = fields
        .allotment
        .map(|v| to_i32(v, "allotment"))
        .transpose()?;
    // Some(0) clears a stay rule; any other value sets it.
    let new_min_stay: Option<Option<i32>> = fields
        .min_stay
        .map(|v| {
            if v == 0 {
                Ok(None)
            } else {
                to_i32(v, "min_stay").map(Some)
            }
        })
        .transpose()?;
    let new_max_stay: Option<Option<i32>> = fields
        .max_stay
        .map(|v| {
            if v == 0 {
                Ok(None)
            } else {
                to_i32(v, "max_stay").map(Some)
            }
        })
        .transpose()?;

    conn.transaction(|conn| {
        let stamp: String = now_timestamp()?;
        let mut matched: usize = 0;
        let mut modified: usize = 0;
        let mut upserted: usize = 0;
        let mut oversold_dates: Vec<String> = Vec::new();

        for date in dates {
            #[allow(clippy::type_complexity)]
            let existing: Option<(
                i64,
                i32,
                i32,
                i32,
                i32,
                Option<i32>,
                Option<i32>,
                Option<String>,
            )> = inventory_records::table
                .select((
                    inventory_records::record_id,
                    inventory_records::allotment,
                    inventory_records::sold,
                    inventory_records::stop_sell,
                    inventory_records::closed,
                    inventory_records::min_stay,
                    inventory_records::max_stay,
                    inventory_records::deleted_at,
                ))
                .filter(inventory_records::property_id.eq(property_id))
                .filter(inventory_records::room_type_id.eq(room_type_id))
                .filter(inventory_records::date.eq(date))
                .first(conn)
                .optional()?;

            match existing {
                Some((record_id, allotment, sold, stop_sell, closed, min_stay, max_stay, None)) => {
                    matched += 1;

                    let merged_allotment: i32 = new_allotment.unwrap_or(allotment);
                    let merged_stop_sell: i32 =
                        fields.stop_sell.map_or(stop_sell, i32::from);
                    let merged_closed: i32 = fields.closed.map_or(closed, i32::from);
                    let merged_min_stay: Option<i32> = new_min_stay.unwrap_or(min_stay);
                    let merged_max_stay: Option<i32> = new_max_stay.unwrap_or(max_stay);

                    if merged_allotment < sold {
                        warn!(
                            date = %date,
                            allotment = merged_allotment,
                            sold,
                            "Bulk edit left record oversold"
                        );
                        oversold_dates.push(date.clone());
                    }

                    let unchanged: bool = merged_allotment == allotment
                        && merged_stop_sell == stop_sell
                        && merged_closed == closed
                        && merged_min_stay == min_stay
                        && merged_max_stay == max_stay;
                    if unchanged {
                        continue;
                    }

                    diesel::update(
                        inventory_records::table
                            .filter(inventory_records::record_id.eq(record_id)),
                    )
                    .set((
                        inventory_records::allotment.eq(merged_allotment),
                        inventory_records::stop_sell.eq(merged_stop_sell),
                        inventory_records::closed.eq(merged_closed),
                        inventory_records::min_stay.eq(merged_min_stay),
                        inventory_records::max_stay.eq(merged_max_stay),
                        inventory_records::updated_at.eq(Some(stamp.clone())),
                    ))
                    .execute(conn)?;
                    modified += 1;
                }
                Some((record_id, _, _, _, _, _, _, Some(_))) => {
                    diesel::update(
                        inventory_records::table
                            .filter(inventory_records::record_id.eq(record_id)),
                    )
                    .set((
                        inventory_records::allotment
                            .eq(new_allotment.unwrap_or(default_i32)),
                        inventory_records::sold.eq(0),
                        inventory_records::stop_sell
                            .eq(fields.stop_sell.map_or(0, i32::from)),
                        inventory_records::closed.eq(fields.closed.map_or(0, i32::from)),
                        inventory_records::min_stay.eq(new_min_stay.unwrap_or(None)),
                        inventory_records::max_stay.eq(new_max_stay.unwrap_or(None)),
                        inventory_records::deleted_at.eq(None::<String>),
                        inventory_records::updated_at.eq(Some(stamp.clone())),
                    ))
                    .execute(conn)?;
                    upserted += 1;
                }
                None => {
                    diesel::insert_into(inventory_records::table)
                        .values(&NewInventoryRow {
                            property_id,
                            room_type_id,
                            date: date.clone(),
                            allotment: new_allotment.unwrap_or(default_i32),
                            sold: 0,
                            stop_sell: fields.stop_sell.map_or(0, i32::from),
                            closed: fields.closed.map_or(0, i32::from),
                            min_stay: new_min_stay.unwrap_or(None),
                            max_stay: new_max_stay.unwrap_or(None),
                            updated_at: Some(stamp.clone()),
                        })
                        .execute(conn)?;
                    upserted += 1;
                }
            }
        }

        Ok(BulkUpdateOutcome {
            matched,
            modified,
            upserted,
            oversold_dates,
        })
    })
}

}

backend_fn! {

/// Soft-deletes every live record in an inclusive date range.
///
/// Deleted records become invisible to queries and availability; the rows
/// remain so a later write to the date can revive them.
///
/// # Errors
///
/// Returns `Busy` on lock contention, or a database error.
pub fn soft_delete_range(
    conn: &mut _,
    property_id: i64,
    room_type_id: i64,
    start_date: &str,
    end_date: &str,
) -> Result<usize, PersistenceError> {
    let stamp: String = now_timestamp()?;
    conn.transaction(|conn| {
        let deleted: usize = diesel::update(
            inventory_records::table
                .filter(inventory_records::property_id.eq(property_id))
                .filter(inventory_records::room_type_id.eq(room_type_id))
                .filter(inventory_records::date.ge(start_date))
                .filter(inventory_records::date.le(end_date))
                .filter(inventory_records::deleted_at.is_null()),
        )
        .set((
            inventory_records::deleted_at.eq(Some(stamp.clone())),
            inventory_records::updated_at.eq(Some(stamp.clone())),
        ))
        .execute(conn)?;
        Ok(deleted)
    })
}

}
