// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the room inventory engine.
//!
//! This crate sits between the HTTP server and the domain/persistence
//! layers. It owns the request/response DTOs, validates inputs, and
//! translates domain and persistence errors into the API error contract.
//! Handlers are transport-agnostic functions; the server crate maps them
//! to routes and HTTP status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    bulk_update, check_availability, decrement_sold, delete_inventory, get_calendar,
    get_inventory, increment_sold, register_property, register_room_type, set_flags,
};
pub use request_response::{
    AdjustSoldRequest, AdjustSoldResponse, BulkUpdateRequest, BulkUpdateResponse,
    CheckAvailabilityRequest, CheckAvailabilityResponse, DeleteInventoryRequest,
    DeleteInventoryResponse, GetCalendarRequest, GetCalendarResponse, GetInventoryRequest,
    GetInventoryResponse, InventoryDayInfo, RegisterPropertyRequest, RegisterPropertyResponse,
    RegisterRoomTypeRequest, RegisterRoomTypeResponse, SetFlagsRequest, SetFlagsResponse,
};
