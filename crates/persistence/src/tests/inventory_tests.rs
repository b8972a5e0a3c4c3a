// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger mutation tests against the in-memory `SQLite` backend.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::tests::{create_test_persistence, july, seed_catalog};
use crate::{InventoryFields, PersistenceError};
use roomledger_domain::format_iso_date;

#[test]
fn increment_materializes_sparse_dates_with_default_allotment() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let dates = vec![july(1), july(2)];
    let outcome = persistence
        .increment_sold(property_id, room_type_id, &dates, 3, 10, None)
        .unwrap();

    assert_eq!(outcome.created, 2);
    assert_eq!(outcome.modified, 0);
    assert!(!outcome.deduplicated);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(1), july(2))
        .unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.allotment, 10);
        assert_eq!(record.sold, 3);
        assert!(!record.stop_sell);
        assert!(!record.closed);
    }
}

#[test]
fn increment_updates_existing_records() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(property_id, room_type_id, &[july(5)], 2, 10, None)
        .unwrap();
    let outcome = persistence
        .increment_sold(property_id, room_type_id, &[july(5)], 4, 10, None)
        .unwrap();

    assert_eq!(outcome.modified, 1);
    assert_eq!(outcome.created, 0);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(5), july(5))
        .unwrap();
    assert_eq!(records[0].sold, 6);
}

#[test]
fn increment_over_allotment_fails_atomically_and_names_all_blocking_dates() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    // Cap two of the three dates below the requested quantity.
    let fields = InventoryFields {
        allotment: Some(2),
        ..Default::default()
    };
    persistence
        .bulk_update(property_id, room_type_id, july(11), july(11), &fields, 10)
        .unwrap();
    persistence
        .bulk_update(property_id, room_type_id, july(13), july(13), &fields, 10)
        .unwrap();

    let dates = vec![july(11), july(12), july(13)];
    let result = persistence.increment_sold(property_id, room_type_id, &dates, 5, 10, None);

    match result {
        Err(PersistenceError::OverAllotment { dates }) => {
            assert_eq!(
                dates,
                vec![format_iso_date(july(11)), format_iso_date(july(13))]
            );
        }
        other => panic!("Expected OverAllotment, got {other:?}"),
    }

    // Nothing was applied, not even on the date with capacity.
    let records = persistence
        .records_in_range(property_id, room_type_id, july(11), july(13))
        .unwrap();
    for record in &records {
        assert_eq!(record.sold, 0);
    }
}

#[test]
fn increment_to_exact_allotment_succeeds() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 4);

    let outcome = persistence
        .increment_sold(property_id, room_type_id, &[july(20)], 4, 4, None)
        .unwrap();
    assert_eq!(outcome.created, 1);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(20), july(20))
        .unwrap();
    assert_eq!(records[0].sold, 4);
    assert_eq!(records[0].available(), 0);
}

#[test]
fn increment_against_full_date_is_rejected_and_leaves_sold_unchanged() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 1);

    persistence
        .increment_sold(property_id, room_type_id, &[july(21)], 1, 1, None)
        .unwrap();

    // A second booking against the now-full date must lose, and sold
    // must stay pinned at the allotment.
    let result = persistence.increment_sold(property_id, room_type_id, &[july(21)], 1, 1, None);
    match result {
        Err(PersistenceError::OverAllotment { dates }) => {
            assert_eq!(dates, vec![format_iso_date(july(21))]);
        }
        other => panic!("Expected OverAllotment, got {other:?}"),
    }

    let records = persistence
        .records_in_range(property_id, room_type_id, july(21), july(21))
        .unwrap();
    assert_eq!(records[0].sold, 1);
}

#[test]
fn increment_with_zero_allotment_is_blocked() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let fields = InventoryFields {
        allotment: Some(0),
        ..Default::default()
    };
    persistence
        .bulk_update(property_id, room_type_id, july(8), july(8), &fields, 10)
        .unwrap();

    let result = persistence.increment_sold(property_id, room_type_id, &[july(8)], 1, 10, None);
    assert!(matches!(result, Err(PersistenceError::OverAllotment { .. })));
}

#[test]
fn increment_applies_duplicate_dates_once() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let dates = vec![july(3), july(3), july(3)];
    persistence
        .increment_sold(property_id, room_type_id, &dates, 2, 10, None)
        .unwrap();

    let records = persistence
        .records_in_range(property_id, room_type_id, july(3), july(3))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sold, 2);
}

#[test]
fn increment_with_commit_key_is_replayed_not_reapplied() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let first = persistence
        .increment_sold(
            property_id,
            room_type_id,
            &[july(15)],
            2,
            10,
            Some("booking-4711"),
        )
        .unwrap();
    assert!(!first.deduplicated);

    let replay = persistence
        .increment_sold(
            property_id,
            room_type_id,
            &[july(15)],
            2,
            10,
            Some("booking-4711"),
        )
        .unwrap();
    assert!(replay.deduplicated);
    assert_eq!(replay.modified, 0);
    assert_eq!(replay.created, 0);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(15), july(15))
        .unwrap();
    assert_eq!(records[0].sold, 2);
}

#[test]
fn distinct_commit_keys_both_apply() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(property_id, room_type_id, &[july(16)], 1, 10, Some("key-a"))
        .unwrap();
    persistence
        .increment_sold(property_id, room_type_id, &[july(16)], 1, 10, Some("key-b"))
        .unwrap();

    let records = persistence
        .records_in_range(property_id, room_type_id, july(16), july(16))
        .unwrap();
    assert_eq!(records[0].sold, 2);
}

#[test]
fn decrement_reduces_sold_count() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(property_id, room_type_id, &[july(10)], 5, 10, None)
        .unwrap();
    let outcome = persistence
        .decrement_sold(property_id, room_type_id, &[july(10)], 3, 10, None)
        .unwrap();

    assert_eq!(outcome.modified, 1);
    assert!(outcome.underflow_dates.is_empty());

    let records = persistence
        .records_in_range(property_id, room_type_id, july(10), july(10))
        .unwrap();
    assert_eq!(records[0].sold, 2);
}

#[test]
fn decrement_clamps_at_zero_and_reports_underflow() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(property_id, room_type_id, &[july(10)], 1, 10, None)
        .unwrap();
    let outcome = persistence
        .decrement_sold(property_id, room_type_id, &[july(10)], 3, 10, None)
        .unwrap();

    assert_eq!(outcome.underflow_dates, vec![format_iso_date(july(10))]);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(10), july(10))
        .unwrap();
    assert_eq!(records[0].sold, 0);
}

#[test]
fn decrement_on_unwritten_date_materializes_record_at_zero() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let outcome = persistence
        .decrement_sold(property_id, room_type_id, &[july(22)], 2, 10, None)
        .unwrap();

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.underflow_dates, vec![format_iso_date(july(22))]);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(22), july(22))
        .unwrap();
    assert_eq!(records[0].sold, 0);
    assert_eq!(records[0].allotment, 10);
}

#[test]
fn bulk_update_applies_fields_across_range() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let fields = InventoryFields {
        allotment: Some(7),
        stop_sell: Some(true),
        min_stay: Some(2),
        ..Default::default()
    };
    let outcome = persistence
        .bulk_update(property_id, room_type_id, july(1), july(5), &fields, 10)
        .unwrap();

    assert_eq!(outcome.matched, 0);
    assert_eq!(outcome.upserted, 5);
    assert!(outcome.oversold_dates.is_empty());

    let records = persistence
        .records_in_range(property_id, room_type_id, july(1), july(5))
        .unwrap();
    assert_eq!(records.len(), 5);
    for record in &records {
        assert_eq!(record.allotment, 7);
        assert!(record.stop_sell);
        assert!(!record.closed);
        assert_eq!(record.min_stay, Some(2));
        assert_eq!(record.max_stay, None);
        assert_eq!(record.sold, 0);
    }
}

#[test]
fn bulk_update_skips_unchanged_records() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let fields = InventoryFields {
        allotment: Some(7),
        ..Default::default()
    };
    persistence
        .bulk_update(property_id, room_type_id, july(1), july(3), &fields, 10)
        .unwrap();
    let second = persistence
        .bulk_update(property_id, room_type_id, july(1), july(3), &fields, 10)
        .unwrap();

    assert_eq!(second.matched, 3);
    assert_eq!(second.modified, 0);
    assert_eq!(second.upserted, 0);
}

#[test]
fn bulk_update_never_touches_sold() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(property_id, room_type_id, &[july(4)], 3, 10, None)
        .unwrap();

    let fields = InventoryFields {
        allotment: Some(8),
        closed: Some(true),
        ..Default::default()
    };
    persistence
        .bulk_update(property_id, room_type_id, july(4), july(4), &fields, 10)
        .unwrap();

    let records = persistence
        .records_in_range(property_id, room_type_id, july(4), july(4))
        .unwrap();
    assert_eq!(records[0].sold, 3);
    assert_eq!(records[0].allotment, 8);
    assert!(records[0].closed);
}

#[test]
fn bulk_update_below_sold_succeeds_and_reports_oversold() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(property_id, room_type_id, &[july(9)], 5, 10, None)
        .unwrap();

    let fields = InventoryFields {
        allotment: Some(3),
        ..Default::default()
    };
    let outcome = persistence
        .bulk_update(property_id, room_type_id, july(9), july(9), &fields, 10)
        .unwrap();

    assert_eq!(outcome.modified, 1);
    assert_eq!(outcome.oversold_dates, vec![format_iso_date(july(9))]);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(9), july(9))
        .unwrap();
    assert_eq!(records[0].allotment, 3);
    assert_eq!(records[0].sold, 5);
    assert!(records[0].is_oversold());
    assert_eq!(records[0].available(), 0);
}

#[test]
fn bulk_update_clears_stay_rule_with_zero() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let set = InventoryFields {
        min_stay: Some(3),
        max_stay: Some(7),
        ..Default::default()
    };
    persistence
        .bulk_update(property_id, room_type_id, july(1), july(1), &set, 10)
        .unwrap();

    let clear = InventoryFields {
        min_stay: Some(0),
        ..Default::default()
    };
    persistence
        .bulk_update(property_id, room_type_id, july(1), july(1), &clear, 10)
        .unwrap();

    let records = persistence
        .records_in_range(property_id, room_type_id, july(1), july(1))
        .unwrap();
    assert_eq!(records[0].min_stay, None);
    assert_eq!(records[0].max_stay, Some(7));
}

#[test]
fn set_flags_materializes_and_counts_touched_records() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    let touched = persistence
        .set_flags(
            property_id,
            room_type_id,
            &[july(24), july(25)],
            Some(true),
            None,
            10,
        )
        .unwrap();
    assert_eq!(touched, 2);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(24), july(25))
        .unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record.stop_sell);
        assert!(!record.closed);
    }

    // Clearing the same flag touches the same two records again.
    let cleared = persistence
        .set_flags(
            property_id,
            room_type_id,
            &[july(24), july(25)],
            Some(false),
            None,
            10,
        )
        .unwrap();
    assert_eq!(cleared, 2);
}

#[test]
fn soft_delete_hides_records_from_reads() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(property_id, room_type_id, &[july(1), july(2)], 2, 10, None)
        .unwrap();

    let deleted = persistence
        .soft_delete_range(property_id, room_type_id, july(1), july(2))
        .unwrap();
    assert_eq!(deleted, 2);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(1), july(2))
        .unwrap();
    assert!(records.is_empty());

    // Deleting again finds nothing live.
    let again = persistence
        .soft_delete_range(property_id, room_type_id, july(1), july(2))
        .unwrap();
    assert_eq!(again, 0);
}

#[test]
fn mutation_on_deleted_date_revives_it_from_defaults() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(property_id, room_type_id, &[july(6)], 8, 10, None)
        .unwrap();
    persistence
        .soft_delete_range(property_id, room_type_id, july(6), july(6))
        .unwrap();

    // The deleted row behaves like an unwritten date: sold starts back at
    // zero and the default allotment applies.
    let outcome = persistence
        .increment_sold(property_id, room_type_id, &[july(6)], 2, 10, None)
        .unwrap();
    assert_eq!(outcome.created, 1);

    let records = persistence
        .records_in_range(property_id, room_type_id, july(6), july(6))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sold, 2);
    assert_eq!(records[0].allotment, 10);
}

#[test]
fn records_for_dates_returns_only_requested_dates() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);

    persistence
        .increment_sold(
            property_id,
            room_type_id,
            &[july(1), july(2), july(3)],
            1,
            10,
            None,
        )
        .unwrap();

    let records = persistence
        .records_for_dates(property_id, room_type_id, &[july(1), july(3)])
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, july(1));
    assert_eq!(records[1].date, july(3));
}

#[test]
fn ledgers_are_isolated_per_room_type() {
    let mut persistence = create_test_persistence();
    let (property_id, room_type_id) = seed_catalog(&mut persistence, 10);
    let other_room_type_id = persistence
        .create_room_type(&roomledger_domain::RoomType::new(
            property_id,
            "STE",
            "Suite",
            4,
        ))
        .unwrap();

    persistence
        .increment_sold(property_id, room_type_id, &[july(1)], 3, 10, None)
        .unwrap();

    let other_records = persistence
        .records_in_range(property_id, other_room_type_id, july(1), july(1))
        .unwrap();
    assert!(other_records.is_empty());
}
