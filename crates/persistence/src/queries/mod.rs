// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! Read-only operations. All queries use Diesel DSL exclusively and are
//! generated in backend-specific monomorphic versions via `backend_fn!`.
//!
//! ## Module Organization
//!
//! - `catalog` — property and room type lookups
//! - `inventory` — ledger record reads (ranges and explicit date sets)

pub mod catalog;
pub mod inventory;

// Re-export backend-specific query functions used by lib.rs
pub use catalog::{
    get_property_mysql, get_property_sqlite, get_room_type_mysql, get_room_type_sqlite,
};
pub use inventory::{
    records_for_dates_mysql, records_for_dates_sqlite, records_in_range_mysql,
    records_in_range_sqlite,
};
