//! Employee and hourly rate models.
//!
//! This module defines the Employee struct and the time-versioned
//! HourlyRate entries forming each employee's rate history.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A worker who can be assigned to events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, denormalized into ledger rows at write time.
    pub name: String,
    /// Fallback hourly rate used only when no versioned rate applies.
    #[serde(default)]
    pub default_hourly_rate: Option<Decimal>,
}

/// One entry in an employee's effective-dated rate history.
///
/// Multiple entries per employee form a history; the most recent entry at
/// or before a given day wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRate {
    /// The employee this rate belongs to.
    pub employee_id: String,
    /// The local day this rate takes effect (inclusive).
    pub effective_date: NaiveDate,
    /// Hourly rate in USD.
    pub rate: Decimal,
}
