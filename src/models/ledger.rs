//! Ledger output models.
//!
//! This module contains the [`LaborDailyRow`] ledger entry produced by the
//! aggregation driver, plus the [`RebuildSummary`] returned to callers.
//!
//! Ledger rows are never individually created or updated: the driver deletes
//! the full set of rows in a date window and inserts a freshly computed
//! replacement set inside one transaction, so a rebuild with unchanged
//! inputs is byte-identical.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One computed labor-cost ledger entry.
///
/// Exactly one row exists per (day, event, employee) triple that has a
/// resolvable pay rate. The row id format is a public contract that
/// downstream reporting collaborators join on; it must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborDailyRow {
    /// Deterministic id: `"{day}-{event_id}-{employee_id}"`.
    pub id: String,
    /// The job the event belongs to.
    pub job_id: String,
    /// Job display name, denormalized at write time.
    pub job_name: String,
    /// The local calendar day this row covers.
    pub day: NaiveDate,
    /// The event that produced this row.
    pub event_id: String,
    /// Event title, denormalized at write time.
    pub event_title: String,
    /// The employee this row covers.
    pub employee_id: String,
    /// Employee display name, denormalized at write time.
    pub employee_name: String,
    /// The assignment the hours were derived from.
    pub source_assignment_id: String,
    /// Total hours credited for the day.
    pub hours: Decimal,
    /// Hours paid at the base rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Resolved hourly rate in USD.
    pub rate_usd: Decimal,
    /// Regular cost in USD, rounded to cents.
    pub regular_cost_usd: Decimal,
    /// Overtime cost in USD, rounded to cents.
    pub overtime_cost_usd: Decimal,
    /// Total cost in USD, rounded to cents.
    pub total_cost_usd: Decimal,
    /// Free-text note carried over from the assignment.
    #[serde(default)]
    pub note: Option<String>,
}

impl LaborDailyRow {
    /// Builds the deterministic row id for a (day, event, employee) triple.
    ///
    /// The format `"{YYYY-MM-DD}-{event_id}-{employee_id}"` is relied on by
    /// downstream joins and exports and must remain stable.
    ///
    /// # Examples
    ///
    /// ```
    /// use labor_engine::models::LaborDailyRow;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
    /// assert_eq!(
    ///     LaborDailyRow::row_id(day, "evt_001", "emp_001"),
    ///     "2025-10-08-evt_001-emp_001"
    /// );
    /// ```
    pub fn row_id(day: NaiveDate, event_id: &str, employee_id: &str) -> String {
        format!("{}-{}-{}", day.format("%Y-%m-%d"), event_id, employee_id)
    }
}

/// An (employee, day) pairing with hours worked but no resolvable pay rate.
///
/// Missing rates are accumulated and reported, never treated as fatal and
/// never silently costed at zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissingRate {
    /// The employee without a resolvable rate.
    pub employee_id: String,
    /// The local day the rate was needed for.
    pub day: NaiveDate,
}

/// Result of a ledger rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildSummary {
    /// Number of ledger rows inserted for the window.
    pub rows_inserted: u64,
    /// Deduplicated (employee, day) pairings that had hours but no rate.
    pub missing_rates: Vec<MissingRate>,
}
