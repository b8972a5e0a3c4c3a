// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for ledger reads and mutations.
//!
//! Handlers validate the request, resolve the catalog, call into the
//! persistence layer, and translate every error to the API contract.
//! They are transport-agnostic; the server crate wires them to routes.

use std::collections::BTreeMap;

use roomledger_domain::{
    InventoryRecord, Property, RoomType, StayRequest, date_range_inclusive, evaluate_availability,
    month_dates, stay_length_violations, validate_allotment, validate_date_range,
    validate_date_set, validate_month, validate_property_fields, validate_quantity,
    validate_room_type_fields, validate_stay_bounds,
};
use roomledger_persistence::{InventoryFields, SqlitePersistence};
use time::Date;
use tracing::debug;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AdjustSoldRequest, AdjustSoldResponse, BulkUpdateRequest, BulkUpdateResponse,
    CheckAvailabilityRequest, CheckAvailabilityResponse, DeleteInventoryRequest,
    DeleteInventoryResponse, GetCalendarRequest, GetCalendarResponse, GetInventoryRequest,
    GetInventoryResponse, InventoryDayInfo, RegisterPropertyRequest, RegisterPropertyResponse,
    RegisterRoomTypeRequest, RegisterRoomTypeResponse, SetFlagsRequest, SetFlagsResponse,
    describe_range,
};

/// Resolves a room type and verifies it belongs to the given property.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the room type does not exist or is owned
/// by a different property.
fn resolve_room_type(
    persistence: &mut SqlitePersistence,
    property_id: i64,
    room_type_id: i64,
) -> Result<RoomType, ApiError> {
    let room_type = persistence
        .get_room_type(room_type_id)
        .map_err(translate_persistence_error)?
        .filter(|rt| rt.property_id() == property_id)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Room type"),
            message: format!("Room type {room_type_id} does not exist in property {property_id}"),
        })?;
    Ok(room_type)
}

/// Renders a dense calendar over `dates`, filling sparse dates from the
/// room type's default allotment.
fn densify(
    records: Vec<InventoryRecord>,
    dates: &[Date],
    property_id: i64,
    room_type_id: i64,
    default_allotment: u32,
) -> Vec<InventoryDayInfo> {
    let by_date: BTreeMap<Date, InventoryRecord> =
        records.into_iter().map(|r| (r.date, r)).collect();

    dates
        .iter()
        .map(|date| {
            by_date.get(date).map_or_else(
                || {
                    InventoryDayInfo::from_record(&InventoryRecord::from_default(
                        property_id,
                        room_type_id,
                        *date,
                        default_allotment,
                    ))
                },
                InventoryDayInfo::from_record,
            )
        })
        .collect()
}

/// Registers a new property.
///
/// # Errors
///
/// Returns an error if a field is invalid or the code is already taken.
pub fn register_property(
    persistence: &mut SqlitePersistence,
    request: RegisterPropertyRequest,
) -> Result<RegisterPropertyResponse, ApiError> {
    let property = Property::new(&request.code, &request.name, &request.timezone);
    validate_property_fields(&property).map_err(translate_domain_error)?;

    let property_id = persistence
        .create_property(&property)
        .map_err(translate_persistence_error)?;

    debug!(property_id, code = %property.code(), "registered property");

    Ok(RegisterPropertyResponse {
        property_id,
        code: property.code().to_string(),
        message: format!("Successfully registered property '{}'", property.code()),
    })
}

/// Registers a new room type within a property.
///
/// # Errors
///
/// Returns an error if a field is invalid, the property does not exist, or
/// the code is already taken within the property.
pub fn register_room_type(
    persistence: &mut SqlitePersistence,
    request: RegisterRoomTypeRequest,
) -> Result<RegisterRoomTypeResponse, ApiError> {
    let room_type = RoomType::new(
        request.property_id,
        &request.code,
        &request.name,
        request.total_quantity,
    );
    validate_room_type_fields(&room_type).map_err(translate_domain_error)?;

    let room_type_id = persistence
        .create_room_type(&room_type)
        .map_err(translate_persistence_error)?;

    debug!(
        room_type_id,
        property_id = request.property_id,
        code = %room_type.code(),
        "registered room type"
    );

    Ok(RegisterRoomTypeResponse {
        room_type_id,
        property_id: request.property_id,
        code: room_type.code().to_string(),
        message: format!("Successfully registered room type '{}'", room_type.code()),
    })
}

/// Reads the inventory calendar over an inclusive date range.
///
/// The response is dense: dates the ledger has never seen are rendered
/// from the room type's default allotment.
///
/// # Errors
///
/// Returns an error if the range is invalid or the room type is unknown.
pub fn get_inventory(
    persistence: &mut SqlitePersistence,
    request: &GetInventoryRequest,
) -> Result<GetInventoryResponse, ApiError> {
    validate_date_range(request.start_date, request.end_date).map_err(translate_domain_error)?;
    let room_type = resolve_room_type(persistence, request.property_id, request.room_type_id)?;

    let dates = date_range_inclusive(request.start_date, request.end_date)
        .map_err(translate_domain_error)?;
    let records = persistence
        .records_in_range(
            request.property_id,
            request.room_type_id,
            request.start_date,
            request.end_date,
        )
        .map_err(translate_persistence_error)?;

    Ok(GetInventoryResponse {
        property_id: request.property_id,
        room_type_id: request.room_type_id,
        days: densify(
            records,
            &dates,
            request.property_id,
            request.room_type_id,
            room_type.total_quantity(),
        ),
    })
}

/// Reads one calendar month of inventory.
///
/// # Errors
///
/// Returns an error if the month is invalid or the room type is unknown.
pub fn get_calendar(
    persistence: &mut SqlitePersistence,
    request: &GetCalendarRequest,
) -> Result<GetCalendarResponse, ApiError> {
    validate_month(request.month).map_err(translate_domain_error)?;
    let room_type = resolve_room_type(persistence, request.property_id, request.room_type_id)?;

    let dates = month_dates(request.year, request.month).map_err(translate_domain_error)?;
    let (first, last) = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(ApiError::Internal {
                message: format!("Month {}-{} produced no dates", request.year, request.month),
            });
        }
    };

    let records = persistence
        .records_in_range(request.property_id, request.room_type_id, first, last)
        .map_err(translate_persistence_error)?;

    Ok(GetCalendarResponse {
        property_id: request.property_id,
        room_type_id: request.room_type_id,
        year: request.year,
        month: request.month,
        days: densify(
            records,
            &dates,
            request.property_id,
            request.room_type_id,
            room_type.total_quantity(),
        ),
    })
}

/// Evaluates availability for a stay over `[check_in, check_out)`.
///
/// The verdict covers capacity and flags; stay-length rules are reported
/// separately and do not affect it.
///
/// # Errors
///
/// Returns an error if the stay range is invalid or the room type is
/// unknown.
pub fn check_availability(
    persistence: &mut SqlitePersistence,
    request: &CheckAvailabilityRequest,
) -> Result<CheckAvailabilityResponse, ApiError> {
    let stay = StayRequest::new(request.check_in, request.check_out, request.rooms_requested)
        .map_err(translate_domain_error)?;
    let room_type = resolve_room_type(persistence, request.property_id, request.room_type_id)?;

    let occupied = stay.occupied_dates().map_err(translate_domain_error)?;
    let records = persistence
        .records_for_dates(request.property_id, request.room_type_id, &occupied)
        .map_err(translate_persistence_error)?;

    let violations = stay_length_violations(stay.nights(), &records);
    let by_date: BTreeMap<Date, InventoryRecord> =
        records.into_iter().map(|r| (r.date, r)).collect();
    let result = evaluate_availability(&stay, &by_date, room_type.total_quantity())
        .map_err(translate_domain_error)?;

    Ok(CheckAvailabilityResponse {
        available: result.available,
        nights: result.nights,
        rooms_available: result.rooms_available,
        limiting_dates: result.limiting_dates,
        stay_rule_violations: violations,
    })
}

/// Atomically increments the sold count across a set of dates.
///
/// # Errors
///
/// Returns `DomainRuleViolation` naming every blocking date when any date
/// lacks capacity; nothing is applied in that case.
pub fn increment_sold(
    persistence: &mut SqlitePersistence,
    request: &AdjustSoldRequest,
) -> Result<AdjustSoldResponse, ApiError> {
    validate_date_set(&request.dates).map_err(translate_domain_error)?;
    validate_quantity(request.quantity).map_err(translate_domain_error)?;
    let room_type = resolve_room_type(persistence, request.property_id, request.room_type_id)?;

    let outcome = persistence
        .increment_sold(
            request.property_id,
            request.room_type_id,
            &request.dates,
            request.quantity,
            room_type.total_quantity(),
            request.idempotency_key.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    let message = if outcome.deduplicated {
        String::from("Already applied; skipped as a duplicate")
    } else {
        format!(
            "Sold {} room(s) across {} date(s)",
            request.quantity,
            outcome.modified + outcome.created
        )
    };

    Ok(AdjustSoldResponse {
        modified: outcome.modified,
        created: outcome.created,
        underflow_dates: outcome.underflow_dates,
        deduplicated: outcome.deduplicated,
        message,
    })
}

/// Atomically decrements the sold count across a set of dates, clamping
/// at zero.
///
/// Never fails for capacity reasons; dates that would go negative are
/// clamped and reported in `underflow_dates`.
///
/// # Errors
///
/// Returns an error if the request is invalid or the room type is unknown.
pub fn decrement_sold(
    persistence: &mut SqlitePersistence,
    request: &AdjustSoldRequest,
) -> Result<AdjustSoldResponse, ApiError> {
    validate_date_set(&request.dates).map_err(translate_domain_error)?;
    validate_quantity(request.quantity).map_err(translate_domain_error)?;
    let room_type = resolve_room_type(persistence, request.property_id, request.room_type_id)?;

    let outcome = persistence
        .decrement_sold(
            request.property_id,
            request.room_type_id,
            &request.dates,
            request.quantity,
            room_type.total_quantity(),
            request.idempotency_key.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    let message = if outcome.deduplicated {
        String::from("Already applied; skipped as a duplicate")
    } else {
        format!(
            "Released {} room(s) across {} date(s)",
            request.quantity,
            outcome.modified + outcome.created
        )
    };

    Ok(AdjustSoldResponse {
        modified: outcome.modified,
        created: outcome.created,
        underflow_dates: outcome.underflow_dates,
        deduplicated: outcome.deduplicated,
        message,
    })
}

/// Bulk-edits allow-listed ledger fields over an inclusive date range.
///
/// The sold count is never writable. Lowering the allotment below the
/// sold count succeeds and the affected dates are reported as oversold.
///
/// # Errors
///
/// Returns an error if the range or any field is invalid, no field is
/// set, or the room type is unknown.
pub fn bulk_update(
    persistence: &mut SqlitePersistence,
    request: &BulkUpdateRequest,
) -> Result<BulkUpdateResponse, ApiError> {
    validate_date_range(request.start_date, request.end_date).map_err(translate_domain_error)?;
    if let Some(allotment) = request.allotment {
        validate_allotment(allotment).map_err(translate_domain_error)?;
    }
    validate_stay_bounds(
        request.min_stay.filter(|&n| n > 0),
        request.max_stay.filter(|&n| n > 0),
    )
    .map_err(translate_domain_error)?;

    let fields = InventoryFields {
        allotment: request.allotment,
        stop_sell: request.stop_sell,
        closed: request.closed,
        min_stay: request.min_stay,
        max_stay: request.max_stay,
    };
    if fields.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("fields"),
            message: String::from("At least one field must be set"),
        });
    }

    let room_type = resolve_room_type(persistence, request.property_id, request.room_type_id)?;

    let outcome = persistence
        .bulk_update(
            request.property_id,
            request.room_type_id,
            request.start_date,
            request.end_date,
            &fields,
            room_type.total_quantity(),
        )
        .map_err(translate_persistence_error)?;

    Ok(BulkUpdateResponse {
        matched: outcome.matched,
        modified: outcome.modified,
        upserted: outcome.upserted,
        oversold_dates: outcome.oversold_dates,
        message: format!(
            "Updated inventory for {}",
            describe_range(request.start_date, request.end_date)
        ),
    })
}

/// Toggles stop-sell/closed flags on a set of dates.
///
/// Flag toggles always succeed; sparse dates are materialized as needed.
///
/// # Errors
///
/// Returns an error if no date or no flag is provided, or the room type
/// is unknown.
pub fn set_flags(
    persistence: &mut SqlitePersistence,
    request: &SetFlagsRequest,
) -> Result<SetFlagsResponse, ApiError> {
    validate_date_set(&request.dates).map_err(translate_domain_error)?;
    if request.stop_sell.is_none() && request.closed.is_none() {
        return Err(ApiError::InvalidInput {
            field: String::from("flags"),
            message: String::from("At least one of stop_sell or closed must be set"),
        });
    }

    let room_type = resolve_room_type(persistence, request.property_id, request.room_type_id)?;

    let touched = persistence
        .set_flags(
            request.property_id,
            request.room_type_id,
            &request.dates,
            request.stop_sell,
            request.closed,
            room_type.total_quantity(),
        )
        .map_err(translate_persistence_error)?;

    Ok(SetFlagsResponse {
        touched,
        message: format!("Updated flags on {touched} date(s)"),
    })
}

/// Soft-deletes ledger records over an inclusive date range.
///
/// Deleted dates revert to default-allotment behavior; a later mutation
/// revives them from scratch.
///
/// # Errors
///
/// Returns an error if the range is invalid or the room type is unknown.
pub fn delete_inventory(
    persistence: &mut SqlitePersistence,
    request: &DeleteInventoryRequest,
) -> Result<DeleteInventoryResponse, ApiError> {
    validate_date_range(request.start_date, request.end_date).map_err(translate_domain_error)?;
    resolve_room_type(persistence, request.property_id, request.room_type_id)?;

    let deleted = persistence
        .soft_delete_range(
            request.property_id,
            request.room_type_id,
            request.start_date,
            request.end_date,
        )
        .map_err(translate_persistence_error)?;

    Ok(DeleteInventoryResponse {
        deleted,
        message: format!(
            "Deleted {deleted} record(s) for {}",
            describe_range(request.start_date, request.end_date)
        ),
    })
}
