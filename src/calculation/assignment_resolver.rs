//! Effective assignment resolution.
//!
//! This module merges an event's base assignments with its day-specific
//! override assignments into one effective assignment per employee for a
//! given local day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::Assignment;

/// Computes the definitive roster for an event on one local day.
///
/// The merge is an explicit two-pass overlay: the first pass seeds the map
/// with base assignments (no day override), the second pass replaces entries
/// with override assignments scoped to `day`. An override never adds a
/// second row for an employee; it takes the base assignment's place. An
/// employee absent from the result has no ledger row for that event/day.
///
/// The result is ordered by employee id so downstream iteration is
/// deterministic.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::effective_assignments;
/// use labor_engine::models::Assignment;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
/// let assignments = vec![
///     Assignment {
///         id: "asn_base".to_string(),
///         event_id: "evt_001".to_string(),
///         employee_id: "emp_001".to_string(),
///         day_override: None,
///         hours: None,
///         note: None,
///     },
///     Assignment {
///         id: "asn_override".to_string(),
///         event_id: "evt_001".to_string(),
///         employee_id: "emp_001".to_string(),
///         day_override: Some(day),
///         hours: Some(Decimal::from(4)),
///         note: None,
///     },
/// ];
///
/// let roster = effective_assignments(&assignments, day);
/// assert_eq!(roster.len(), 1);
/// assert_eq!(roster["emp_001"].id, "asn_override");
/// ```
pub fn effective_assignments(
    assignments: &[Assignment],
    day: NaiveDate,
) -> BTreeMap<String, &Assignment> {
    let mut roster: BTreeMap<String, &Assignment> = BTreeMap::new();

    // Pass 1: base assignments apply to every day of the event.
    for assignment in assignments.iter().filter(|a| a.is_base()) {
        roster.insert(assignment.employee_id.clone(), assignment);
    }

    // Pass 2: overrides scoped to this day replace the base entry.
    for assignment in assignments
        .iter()
        .filter(|a| a.day_override == Some(day))
    {
        roster.insert(assignment.employee_id.clone(), assignment);
    }

    roster
}
