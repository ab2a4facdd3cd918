//! Configuration types for the aggregation engine.
//!
//! These are the strongly-typed runtime settings consumed by the driver.
//! The YAML-facing structures live in the loader; validation happens there
//! so an `EngineConfig` in hand is always usable.

use chrono_tz::Tz;
use rust_decimal::Decimal;

/// Daily overtime policy.
///
/// Overtime is split per (event-day, employee): hours beyond the daily
/// threshold are paid at the base rate times the overtime multiplier.
/// An engine configured without a policy performs no overtime splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimePolicy {
    /// Daily hours threshold beyond which overtime applies.
    pub daily_threshold_hours: Decimal,
    /// Cost multiplier applied to overtime hours (greater than 1).
    pub multiplier: Decimal,
}

/// Runtime configuration for the aggregation engine.
///
/// Passed into [`crate::aggregation::AggregationEngine`] at construction;
/// never read from ambient globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// The organization's IANA time zone. All day boundaries are computed
    /// in this single zone, not per employee.
    pub timezone: Tz,
    /// Hours credited to an assignment without explicit hours, capping the
    /// day segment's elapsed hours.
    pub default_day_hours_cap: Decimal,
    /// Overtime policy; `None` disables overtime splitting entirely.
    pub overtime: Option<OvertimePolicy>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::New_York,
            default_day_hours_cap: Decimal::from(8),
            overtime: Some(OvertimePolicy {
                daily_threshold_hours: Decimal::from(8),
                multiplier: Decimal::new(15, 1),
            }),
        }
    }
}

impl EngineConfig {
    /// Returns a copy of this configuration with overtime splitting disabled.
    pub fn without_overtime(mut self) -> Self {
        self.overtime = None;
        self
    }
}
