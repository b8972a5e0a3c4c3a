// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stay-length rule evaluation.
//!
//! Minimum and maximum stay restrictions are evaluated separately from
//! capacity availability so callers can distinguish "no rooms" from
//! "rooms exist but the stay length is not accepted".

use crate::types::InventoryRecord;
use serde::{Deserialize, Serialize};
use time::Date;

/// Which stay-length rule a date violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StayRule {
    /// The stay is shorter than the date's minimum.
    MinimumStay,
    /// The stay is longer than the date's maximum.
    MaximumStay,
}

impl std::fmt::Display for StayRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinimumStay => write!(f, "minimum stay"),
            Self::MaximumStay => write!(f, "maximum stay"),
        }
    }
}

/// A single per-date stay-length violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRuleViolation {
    /// The date carrying the rule.
    pub date: Date,
    /// Which rule was violated.
    pub rule: StayRule,
    /// The rule's limit in nights.
    pub limit: u32,
}

/// Reports every stay-length rule a stay of `nights` nights would violate.
///
/// Dates without rules contribute nothing. The result does not affect the
/// capacity verdict from [`crate::evaluate_availability`].
///
/// # Arguments
///
/// * `nights` - The stay length in nights
/// * `records` - The ledger records covering the occupied dates
pub fn stay_length_violations<'a, I>(nights: u32, records: I) -> Vec<StayRuleViolation>
where
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let mut violations: Vec<StayRuleViolation> = Vec::new();

    for record in records {
        if let Some(min_stay) = record.min_stay
            && nights < min_stay
        {
            violations.push(StayRuleViolation {
                date: record.date,
                rule: StayRule::MinimumStay,
                limit: min_stay,
            });
        }
        if let Some(max_stay) = record.max_stay
            && nights > max_stay
        {
            violations.push(StayRuleViolation {
                date: record.date,
                rule: StayRule::MaximumStay,
                limit: max_stay,
            });
        }
    }

    violations
}
