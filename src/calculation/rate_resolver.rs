//! Time-versioned pay rate resolution.
//!
//! This module provides the [`RateResolver`], built once per rebuild from
//! the employee roster and the full rate history, answering "what did this
//! employee cost per hour on this day" lookups.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Employee, HourlyRate};

/// Resolves the effective hourly rate for an (employee, day) pairing.
///
/// The resolver holds a read-only snapshot taken at the start of a run;
/// rate changes made after a run started do not retroactively affect it.
///
/// Lookup semantics: the most recent history entry with
/// `effective_date <= day` wins; with no qualifying entry the employee's
/// default rate applies; with neither, the lookup reports a missing rate
/// (`None`) rather than fabricating a zero cost.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::RateResolver;
/// use labor_engine::models::{Employee, HourlyRate};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employees = vec![Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Vasquez".to_string(),
///     default_hourly_rate: Some(Decimal::from(22)),
/// }];
/// let history = vec![HourlyRate {
///     employee_id: "emp_001".to_string(),
///     effective_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     rate: Decimal::from(25),
/// }];
///
/// let resolver = RateResolver::new(&employees, history);
/// let july = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// assert_eq!(resolver.resolve("emp_001", july), Some(Decimal::from(25)));
/// ```
#[derive(Debug, Clone)]
pub struct RateResolver {
    /// Per-employee history, ascending by effective date.
    history: HashMap<String, Vec<HourlyRate>>,
    /// Per-employee fallback rates.
    defaults: HashMap<String, Decimal>,
}

impl RateResolver {
    /// Builds a resolver from an employee roster and rate history snapshot.
    ///
    /// History entries are grouped per employee and sorted ascending by
    /// effective date; ties keep their input order, last one winning.
    pub fn new(employees: &[Employee], rates: Vec<HourlyRate>) -> Self {
        let mut history: HashMap<String, Vec<HourlyRate>> = HashMap::new();
        for rate in rates {
            history.entry(rate.employee_id.clone()).or_default().push(rate);
        }
        for entries in history.values_mut() {
            entries.sort_by_key(|r| r.effective_date);
        }

        let defaults = employees
            .iter()
            .filter_map(|e| e.default_hourly_rate.map(|rate| (e.id.clone(), rate)))
            .collect();

        Self { history, defaults }
    }

    /// Resolves the effective hourly rate for an employee on a local day.
    ///
    /// Returns `None` when neither a qualifying history entry nor a default
    /// rate exists — the caller records the pairing as a missing rate and
    /// emits no ledger row for it.
    pub fn resolve(&self, employee_id: &str, day: NaiveDate) -> Option<Decimal> {
        if let Some(entries) = self.history.get(employee_id) {
            // Entries are sorted ascending, so the last one at or before the
            // day is the effective one.
            if let Some(entry) = entries.iter().rfind(|r| r.effective_date <= day) {
                return Some(entry.rate);
            }
        }

        self.defaults.get(employee_id).copied()
    }
}
