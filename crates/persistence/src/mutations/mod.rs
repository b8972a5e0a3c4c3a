// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! All state-changing ledger operations live here. Every mutation runs
//! inside a database transaction and uses Diesel DSL exclusively; the only
//! backend-specific pieces are imported from the `backend` module.
//!
//! ## Module Organization
//!
//! - `catalog` — property and room type registration
//! - `inventory` — sold-count mutations, bulk range edits, flag toggles,
//!   soft deletes

pub mod catalog;
pub mod inventory;

// Re-export backend-specific mutation functions used by lib.rs
pub use catalog::{
    create_property_mysql, create_property_sqlite, create_room_type_mysql,
    create_room_type_sqlite,
};
pub use inventory::{
    BulkUpdateOutcome, CommitOutcome, InventoryFields, bulk_update_mysql, bulk_update_sqlite,
    decrement_sold_mysql, decrement_sold_sqlite, increment_sold_mysql, increment_sold_sqlite,
    soft_delete_range_mysql, soft_delete_range_sqlite,
};
