//! Assignment model.
//!
//! This module defines the Assignment struct representing a crew member's
//! participation in an event, either for the event's full span (a base
//! assignment) or for one specific local day (an override assignment).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A crew member's participation in an event.
///
/// An assignment with no `day_override` is a base assignment applying to
/// every day the event spans. An assignment with `day_override` applies only
/// to that day and, for that employee on that day, replaces any base
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The event this assignment belongs to.
    pub event_id: String,
    /// The employee assigned to the event.
    pub employee_id: String,
    /// A specific local calendar day this assignment applies to instead of
    /// the event's full span.
    #[serde(default)]
    pub day_override: Option<NaiveDate>,
    /// Explicit hours for the day, overriding computed segment hours.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Free-text note carried onto the ledger row.
    #[serde(default)]
    pub note: Option<String>,
}

impl Assignment {
    /// Returns true if this is a base assignment (no day override).
    ///
    /// # Examples
    ///
    /// ```
    /// use labor_engine::models::Assignment;
    ///
    /// let base = Assignment {
    ///     id: "asn_001".to_string(),
    ///     event_id: "evt_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     day_override: None,
    ///     hours: None,
    ///     note: None,
    /// };
    /// assert!(base.is_base());
    /// ```
    pub fn is_base(&self) -> bool {
        self.day_override.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_base_assignment_has_no_override() {
        let assignment = Assignment {
            id: "asn_001".to_string(),
            event_id: "evt_001".to_string(),
            employee_id: "emp_001".to_string(),
            day_override: None,
            hours: None,
            note: None,
        };
        assert!(assignment.is_base());
    }

    #[test]
    fn test_override_assignment_is_not_base() {
        let assignment = Assignment {
            id: "asn_002".to_string(),
            event_id: "evt_001".to_string(),
            employee_id: "emp_001".to_string(),
            day_override: NaiveDate::from_ymd_opt(2025, 10, 8),
            hours: Some(Decimal::from_str("6.5").unwrap()),
            note: Some("left early".to_string()),
        };
        assert!(!assignment.is_base());
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let json = r#"{
            "id": "asn_003",
            "event_id": "evt_001",
            "employee_id": "emp_002"
        }"#;

        let assignment: Assignment = serde_json::from_str(json).unwrap();
        assert!(assignment.is_base());
        assert!(assignment.hours.is_none());
        assert!(assignment.note.is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let assignment = Assignment {
            id: "asn_004".to_string(),
            event_id: "evt_002".to_string(),
            employee_id: "emp_003".to_string(),
            day_override: NaiveDate::from_ymd_opt(2025, 10, 9),
            hours: Some(Decimal::from_str("4.25").unwrap()),
            note: Some("half day".to_string()),
        };

        let json = serde_json::to_string(&assignment).unwrap();
        let deserialized: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(assignment, deserialized);
    }
}
