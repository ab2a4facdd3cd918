//! Event model.
//!
//! This module defines the Event struct representing a scheduled job
//! occurrence. Events are owned by the scheduling subsystem and are
//! read-only to this engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A scheduled job occurrence.
///
/// The interval is `[starts_at, ends_at)` in UTC; the day splitter cuts it
/// into local calendar days in the organizational zone. `job_name` is
/// denormalized by the event query (a join against the jobs table) so the
/// driver can stamp it into ledger rows at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for the event.
    pub id: String,
    /// The project/calendar grouping this event belongs to.
    pub job_id: String,
    /// Display name of the job, denormalized at read time.
    pub job_name: String,
    /// Title of the event.
    pub title: String,
    /// The UTC instant the event starts (inclusive).
    pub starts_at: DateTime<Utc>,
    /// The UTC instant the event ends (exclusive).
    pub ends_at: DateTime<Utc>,
}

impl Event {
    /// Calculates the total elapsed hours of the event interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use labor_engine::models::Event;
    /// use chrono::{TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let event = Event {
    ///     id: "evt_001".to_string(),
    ///     job_id: "job_001".to_string(),
    ///     job_name: "Riverside Apartments".to_string(),
    ///     title: "Framing".to_string(),
    ///     starts_at: Utc.with_ymd_and_hms(2025, 10, 8, 12, 0, 0).unwrap(),
    ///     ends_at: Utc.with_ymd_and_hms(2025, 10, 8, 20, 30, 0).unwrap(),
    /// };
    /// assert_eq!(event.elapsed_hours(), Decimal::new(85, 1)); // 8.5 hours
    /// ```
    pub fn elapsed_hours(&self) -> Decimal {
        let minutes = (self.ends_at - self.starts_at).num_minutes();
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }

    /// Returns true if the interval has positive length.
    ///
    /// Zero-length or inverted intervals are legitimate no-op scheduling
    /// states; the driver skips them silently.
    pub fn is_schedulable(&self) -> bool {
        self.ends_at > self.starts_at
    }
}
