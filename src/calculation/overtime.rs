//! Daily overtime splitting functionality.
//!
//! This module splits the hours an employee worked on one event-day into
//! regular and overtime portions per the configured daily threshold, and
//! provides the currency rounding used for every cost column.
//!
//! The split is per (event-day, employee); hours are never aggregated
//! across an employee's events on the same calendar day.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::OvertimePolicy;

/// The regular/overtime split for one event-day's hours.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::split_hours;
/// use labor_engine::config::OvertimePolicy;
/// use rust_decimal::Decimal;
///
/// let policy = OvertimePolicy {
///     daily_threshold_hours: Decimal::from(8),
///     multiplier: Decimal::new(15, 1),
/// };
/// let split = split_hours(Decimal::from(10), Some(&policy));
/// assert_eq!(split.regular_hours, Decimal::from(8));
/// assert_eq!(split.overtime_hours, Decimal::from(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSplit {
    /// Hours paid at the base rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Cost multiplier for regular hours (always 1).
    pub regular_multiplier: Decimal,
    /// Cost multiplier for overtime hours (0 when no overtime applies).
    pub overtime_multiplier: Decimal,
}

/// Splits one event-day's hours into regular and overtime portions.
///
/// With no policy configured, or hours at or under the threshold, all hours
/// are regular with an overtime multiplier of zero. Beyond the threshold,
/// regular hours are capped at the threshold and the excess is overtime at
/// the policy's multiplier.
pub fn split_hours(hours: Decimal, policy: Option<&OvertimePolicy>) -> HoursSplit {
    match policy {
        Some(policy) if hours > policy.daily_threshold_hours => HoursSplit {
            regular_hours: policy.daily_threshold_hours,
            overtime_hours: hours - policy.daily_threshold_hours,
            regular_multiplier: Decimal::ONE,
            overtime_multiplier: policy.multiplier,
        },
        _ => HoursSplit {
            regular_hours: hours,
            overtime_hours: Decimal::ZERO,
            regular_multiplier: Decimal::ONE,
            overtime_multiplier: Decimal::ZERO,
        },
    }
}

/// Rounds a cost to whole cents, half away from zero.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("10.005").unwrap();
/// assert_eq!(round_currency(amount), Decimal::from_str("10.01").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
