//! The aggregation driver.
//!
//! Orchestrates the day splitter, assignment resolver, rate resolver, and
//! overtime splitter across all events overlapping a target window, then
//! performs the atomic delete-and-replace of the ledger for that window.
//!
//! Concurrent rebuilds over overlapping windows are not safe: the write is
//! a full-window replace, not a merge, so callers must serialize rebuilds
//! (the HTTP layer does this with a single mutex around the database).

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{
    RateResolver, day_window_utc, effective_assignments, round_currency, split_by_local_day,
    split_hours,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Assignment, Employee, Event, HourlyRate, LaborDailyRow, MissingRate, RebuildSummary,
};
use crate::store::Database;

/// Read-only snapshot of the upstream data feeding one rebuild.
///
/// Taken once at the start of a run; rate or roster changes made after a
/// run started do not retroactively affect it.
#[derive(Debug, Clone)]
pub struct RebuildInputs {
    /// Events overlapping the rebuild window, ordered by start then id.
    pub events: Vec<Event>,
    /// All assignments belonging to those events.
    pub assignments: Vec<Assignment>,
    /// The full employee roster.
    pub employees: Vec<Employee>,
    /// The full effective-dated rate history.
    pub rates: Vec<HourlyRate>,
}

/// The Labor Daily Aggregation Engine driver.
///
/// Holds the engine configuration explicitly; two engines with different
/// configurations can coexist in one process.
///
/// # Example
///
/// ```
/// use labor_engine::aggregation::AggregationEngine;
/// use labor_engine::config::EngineConfig;
/// use labor_engine::store::Database;
///
/// let engine = AggregationEngine::new(EngineConfig::default());
/// let mut db = Database::open_in_memory().unwrap();
///
/// let summary = engine.rebuild(&mut db, "2025-10-07", "2025-10-10").unwrap();
/// assert_eq!(summary.rows_inserted, 0);
/// ```
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    config: EngineConfig,
}

impl AggregationEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rebuilds the labor ledger for an inclusive date window.
    ///
    /// Dates are `YYYY-MM-DD` strings, validated before any store access.
    /// The rebuild deletes every ledger row whose day falls in the window
    /// and inserts a freshly computed replacement set in one transaction,
    /// so re-running with unchanged inputs is byte-identical and a window
    /// with no overlapping events is legitimately emptied.
    ///
    /// Pairings without a resolvable rate are reported in the summary, not
    /// treated as errors; any store failure aborts the whole rebuild with
    /// the transaction rolled back.
    pub fn rebuild(
        &self,
        db: &mut Database,
        start_date: &str,
        end_date: &str,
    ) -> EngineResult<RebuildSummary> {
        let (start_day, end_day) = parse_window(start_date, end_date)?;
        let (window_start, window_end) = day_window_utc(start_day, end_day, self.config.timezone);

        let events = db.events_overlapping(window_start, window_end)?;
        if events.is_empty() {
            db.replace_ledger_window(start_day, end_day, &[])?;
            info!(%start_day, %end_day, "No overlapping events; ledger window emptied");
            return Ok(RebuildSummary {
                rows_inserted: 0,
                missing_rates: Vec::new(),
            });
        }

        let event_ids: Vec<String> = events.iter().map(|e| e.id.clone()).collect();
        let inputs = RebuildInputs {
            assignments: db.assignments_for_events(&event_ids)?,
            employees: db.load_employees()?,
            rates: db.load_rate_history()?,
            events,
        };

        let (rows, missing_rates) = self.compute_rows(&inputs, start_day, end_day);
        let rows_inserted = db.replace_ledger_window(start_day, end_day, &rows)?;

        info!(
            %start_day,
            %end_day,
            events = inputs.events.len(),
            rows_inserted,
            "Ledger window rebuilt"
        );
        if !missing_rates.is_empty() {
            warn!(
                missing = missing_rates.len(),
                "Pairings skipped for missing pay rates"
            );
        }

        Ok(RebuildSummary {
            rows_inserted,
            missing_rates,
        })
    }

    /// Computes the replacement row set for a window from an input snapshot.
    ///
    /// Pure with respect to the store; exposed so tests and benchmarks can
    /// exercise the full calculation without a database.
    pub fn compute_rows(
        &self,
        inputs: &RebuildInputs,
        start_day: NaiveDate,
        end_day: NaiveDate,
    ) -> (Vec<LaborDailyRow>, Vec<MissingRate>) {
        let resolver = RateResolver::new(&inputs.employees, inputs.rates.clone());

        let names: HashMap<&str, &str> = inputs
            .employees
            .iter()
            .map(|e| (e.id.as_str(), e.name.as_str()))
            .collect();

        let mut assignments_by_event: HashMap<&str, Vec<Assignment>> = HashMap::new();
        for assignment in &inputs.assignments {
            assignments_by_event
                .entry(assignment.event_id.as_str())
                .or_default()
                .push(assignment.clone());
        }

        let mut rows = Vec::new();
        let mut missing: BTreeSet<MissingRate> = BTreeSet::new();

        for event in &inputs.events {
            // Zero-length and inverted intervals are legitimate no-op
            // scheduling states.
            if !event.is_schedulable() {
                continue;
            }

            let Some(event_assignments) = assignments_by_event.get(event.id.as_str()) else {
                continue;
            };

            let segments = split_by_local_day(event.starts_at, event.ends_at, self.config.timezone);
            for segment in segments {
                // The splitter covers the event's whole span; clip to the
                // requested window here.
                if segment.day < start_day || segment.day > end_day {
                    continue;
                }

                let roster = effective_assignments(event_assignments, segment.day);
                for (employee_id, assignment) in roster {
                    let hours = assignment
                        .hours
                        .unwrap_or_else(|| segment.hours.min(self.config.default_day_hours_cap));
                    if hours <= Decimal::ZERO {
                        continue;
                    }

                    let Some(rate) = resolver.resolve(&employee_id, segment.day) else {
                        missing.insert(MissingRate {
                            employee_id,
                            day: segment.day,
                        });
                        continue;
                    };

                    let split = split_hours(hours, self.config.overtime.as_ref());
                    let regular_cost = round_currency(split.regular_hours * rate);
                    let overtime_cost =
                        round_currency(split.overtime_hours * rate * split.overtime_multiplier);

                    rows.push(LaborDailyRow {
                        id: LaborDailyRow::row_id(segment.day, &event.id, &employee_id),
                        job_id: event.job_id.clone(),
                        job_name: event.job_name.clone(),
                        day: segment.day,
                        event_id: event.id.clone(),
                        event_title: event.title.clone(),
                        employee_name: names
                            .get(employee_id.as_str())
                            .map(|n| n.to_string())
                            .unwrap_or_else(|| employee_id.clone()),
                        employee_id,
                        source_assignment_id: assignment.id.clone(),
                        hours,
                        regular_hours: split.regular_hours,
                        overtime_hours: split.overtime_hours,
                        rate_usd: rate,
                        regular_cost_usd: regular_cost,
                        overtime_cost_usd: overtime_cost,
                        total_cost_usd: regular_cost + overtime_cost,
                        note: assignment.note.clone(),
                    });
                }
            }
        }

        (rows, missing.into_iter().collect())
    }
}

/// Parses and validates an inclusive `YYYY-MM-DD` window.
fn parse_window(start: &str, end: &str) -> EngineResult<(NaiveDate, NaiveDate)> {
    let start_day = parse_day(start)?;
    let end_day = parse_day(end)?;
    if start_day > end_day {
        return Err(EngineError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok((start_day, end_day))
}

fn parse_day(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OvertimePolicy;
    use chrono::{DateTime, TimeZone, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn engine() -> AggregationEngine {
        AggregationEngine::new(EngineConfig::default())
    }

    fn engine_without_overtime() -> AggregationEngine {
        AggregationEngine::new(EngineConfig::default().without_overtime())
    }

    fn employee(id: &str, name: &str, default_rate: Option<&str>) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            default_hourly_rate: default_rate.map(dec),
        }
    }

    fn base_assignment(id: &str, event_id: &str, employee_id: &str) -> Assignment {
        Assignment {
            id: id.to_string(),
            event_id: event_id.to_string(),
            employee_id: employee_id.to_string(),
            day_override: None,
            hours: None,
            note: None,
        }
    }

    fn event(id: &str, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            job_id: "job_001".to_string(),
            job_name: "Riverside Apartments".to_string(),
            title: "Framing".to_string(),
            starts_at,
            ends_at,
        }
    }

    /// The multi-day scenario: a base assignment with no explicit hours on
    /// an event spanning 22:00 Oct 7 to 10:00 Oct 10 New York local, day
    /// cap 8h, rate $25/h, no overtime.
    fn multi_day_inputs() -> RebuildInputs {
        RebuildInputs {
            events: vec![event("evt_001", utc(2025, 10, 8, 2), utc(2025, 10, 10, 14))],
            assignments: vec![base_assignment("asn_001", "evt_001", "emp_001")],
            employees: vec![employee("emp_001", "Maria Vasquez", Some("25"))],
            rates: vec![],
        }
    }

    // ==========================================================================
    // AD-001: multi-day event yields one capped row per local day
    // ==========================================================================
    #[test]
    fn test_ad_001_multi_day_event_one_row_per_day() {
        let (rows, missing) = engine_without_overtime().compute_rows(
            &multi_day_inputs(),
            date("2025-10-01"),
            date("2025-10-31"),
        );

        assert!(missing.is_empty());
        assert_eq!(rows.len(), 4);

        let expectations = [
            ("2025-10-07", "2", "50.00"),
            ("2025-10-08", "8", "200.00"),
            ("2025-10-09", "8", "200.00"),
            ("2025-10-10", "8", "200.00"),
        ];
        for (row, (day, hours, total)) in rows.iter().zip(expectations) {
            assert_eq!(row.day, date(day));
            assert_eq!(row.hours, dec(hours));
            assert_eq!(row.overtime_hours, dec("0"));
            assert_eq!(row.total_cost_usd, dec(total));
            assert_eq!(row.id, format!("{}-evt_001-emp_001", day));
            assert_eq!(row.rate_usd, dec("25"));
            assert_eq!(row.employee_name, "Maria Vasquez");
            assert_eq!(row.job_name, "Riverside Apartments");
            assert_eq!(row.source_assignment_id, "asn_001");
        }
    }

    // ==========================================================================
    // AD-002: segments outside the requested window are clipped
    // ==========================================================================
    #[test]
    fn test_ad_002_window_clips_segments() {
        let (rows, _) = engine_without_overtime().compute_rows(
            &multi_day_inputs(),
            date("2025-10-08"),
            date("2025-10-09"),
        );

        let days: Vec<NaiveDate> = rows.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![date("2025-10-08"), date("2025-10-09")]);
    }

    // ==========================================================================
    // AD-003: overtime boundary (threshold 8h, multiplier 1.5, 10h worked)
    // ==========================================================================
    #[test]
    fn test_ad_003_overtime_boundary() {
        let mut inputs = multi_day_inputs();
        inputs.events = vec![event("evt_001", utc(2025, 10, 8, 12), utc(2025, 10, 8, 22))];
        inputs.assignments = vec![Assignment {
            hours: Some(dec("10")),
            ..base_assignment("asn_001", "evt_001", "emp_001")
        }];

        let engine = AggregationEngine::new(EngineConfig {
            overtime: Some(OvertimePolicy {
                daily_threshold_hours: dec("8"),
                multiplier: dec("1.5"),
            }),
            ..EngineConfig::default()
        });
        let (rows, _) = engine.compute_rows(&inputs, date("2025-10-01"), date("2025-10-31"));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].regular_hours, dec("8"));
        assert_eq!(rows[0].overtime_hours, dec("2"));
        assert_eq!(rows[0].regular_cost_usd, dec("200.00"));
        assert_eq!(rows[0].overtime_cost_usd, dec("75.00"));
        assert_eq!(rows[0].total_cost_usd, dec("275.00"));
    }

    // ==========================================================================
    // AD-004: missing rates are recorded once and never fatal
    // ==========================================================================
    #[test]
    fn test_ad_004_missing_rate_deduplicated_across_events() {
        let inputs = RebuildInputs {
            events: vec![
                event("evt_001", utc(2025, 10, 8, 12), utc(2025, 10, 8, 16)),
                event("evt_002", utc(2025, 10, 8, 17), utc(2025, 10, 8, 21)),
            ],
            assignments: vec![
                base_assignment("asn_001", "evt_001", "emp_norate"),
                base_assignment("asn_002", "evt_002", "emp_norate"),
                base_assignment("asn_003", "evt_001", "emp_001"),
            ],
            employees: vec![
                employee("emp_001", "Maria Vasquez", Some("25")),
                employee("emp_norate", "Ghost Worker", None),
            ],
            rates: vec![],
        };

        let (rows, missing) =
            engine().compute_rows(&inputs, date("2025-10-01"), date("2025-10-31"));

        // The rated employee still gets a row.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_id, "emp_001");

        // The unrated pairing appears exactly once despite two events.
        assert_eq!(
            missing,
            vec![MissingRate {
                employee_id: "emp_norate".to_string(),
                day: date("2025-10-08"),
            }]
        );
    }

    // ==========================================================================
    // AD-005: explicit assignment hours override the computed segment hours
    // ==========================================================================
    #[test]
    fn test_ad_005_explicit_hours_override_cap() {
        let mut inputs = multi_day_inputs();
        inputs.events = vec![event("evt_001", utc(2025, 10, 8, 12), utc(2025, 10, 8, 16))];
        inputs.assignments = vec![Assignment {
            hours: Some(dec("12")),
            ..base_assignment("asn_001", "evt_001", "emp_001")
        }];

        let (rows, _) = engine_without_overtime().compute_rows(
            &inputs,
            date("2025-10-01"),
            date("2025-10-31"),
        );

        // Explicit hours win over both the 4h segment and the 8h cap.
        assert_eq!(rows[0].hours, dec("12"));
        assert_eq!(rows[0].total_cost_usd, dec("300.00"));
    }

    // ==========================================================================
    // AD-006: day overrides replace the base assignment for their day only
    // ==========================================================================
    #[test]
    fn test_ad_006_day_override_replaces_base() {
        let mut inputs = multi_day_inputs();
        inputs.assignments.push(Assignment {
            id: "asn_override".to_string(),
            event_id: "evt_001".to_string(),
            employee_id: "emp_001".to_string(),
            day_override: Some(date("2025-10-09")),
            hours: Some(dec("4")),
            note: Some("half day".to_string()),
        });

        let (rows, _) = engine_without_overtime().compute_rows(
            &inputs,
            date("2025-10-01"),
            date("2025-10-31"),
        );

        assert_eq!(rows.len(), 4);
        let oct9: Vec<&LaborDailyRow> =
            rows.iter().filter(|r| r.day == date("2025-10-09")).collect();
        assert_eq!(oct9.len(), 1);
        assert_eq!(oct9[0].source_assignment_id, "asn_override");
        assert_eq!(oct9[0].hours, dec("4"));
        assert_eq!(oct9[0].note.as_deref(), Some("half day"));

        // The other days still come from the base assignment.
        assert_eq!(rows[0].source_assignment_id, "asn_001");
    }

    // ==========================================================================
    // AD-007: degenerate events and non-positive hours are skipped silently
    // ==========================================================================
    #[test]
    fn test_ad_007_degenerate_event_skipped() {
        let mut inputs = multi_day_inputs();
        inputs.events = vec![event("evt_001", utc(2025, 10, 8, 12), utc(2025, 10, 8, 12))];

        let (rows, missing) = engine().compute_rows(&inputs, date("2025-10-01"), date("2025-10-31"));
        assert!(rows.is_empty());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_ad_007_zero_explicit_hours_skipped() {
        let mut inputs = multi_day_inputs();
        inputs.events = vec![event("evt_001", utc(2025, 10, 8, 12), utc(2025, 10, 8, 16))];
        inputs.assignments = vec![Assignment {
            hours: Some(dec("0")),
            ..base_assignment("asn_001", "evt_001", "emp_001")
        }];

        let (rows, missing) = engine().compute_rows(&inputs, date("2025-10-01"), date("2025-10-31"));
        assert!(rows.is_empty());
        assert!(missing.is_empty());
    }

    // ==========================================================================
    // AD-008: versioned rates win over defaults, per day
    // ==========================================================================
    #[test]
    fn test_ad_008_versioned_rate_applies_per_day() {
        let mut inputs = multi_day_inputs();
        // Raise the rate mid-event: Oct 9 onward costs $30/h.
        inputs.rates = vec![HourlyRate {
            employee_id: "emp_001".to_string(),
            effective_date: date("2025-10-09"),
            rate: dec("30"),
        }];

        let (rows, _) = engine_without_overtime().compute_rows(
            &inputs,
            date("2025-10-01"),
            date("2025-10-31"),
        );

        assert_eq!(rows[0].rate_usd, dec("25")); // Oct 7, default
        assert_eq!(rows[1].rate_usd, dec("25")); // Oct 8, default
        assert_eq!(rows[2].rate_usd, dec("30")); // Oct 9, versioned
        assert_eq!(rows[3].rate_usd, dec("30")); // Oct 10, versioned
    }

    // ==========================================================================
    // Input validation
    // ==========================================================================
    #[test]
    fn test_rebuild_rejects_malformed_date() {
        let mut db = Database::open_in_memory().unwrap();
        let result = engine().rebuild(&mut db, "2025-13-40", "2025-10-10");
        assert!(matches!(result, Err(EngineError::InvalidDate { .. })));
    }

    #[test]
    fn test_rebuild_rejects_inverted_range() {
        let mut db = Database::open_in_memory().unwrap();
        let result = engine().rebuild(&mut db, "2025-10-10", "2025-10-07");
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_parse_window_accepts_single_day() {
        assert!(parse_window("2025-10-08", "2025-10-08").is_ok());
    }

    // ==========================================================================
    // End-to-end rebuilds against an in-memory store
    // ==========================================================================
    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_job("job_001", "Riverside Apartments").unwrap();
        db.insert_event(
            "evt_001",
            "job_001",
            "Framing",
            utc(2025, 10, 8, 2),
            utc(2025, 10, 10, 14),
        )
        .unwrap();
        db.insert_employee(&employee("emp_001", "Maria Vasquez", Some("25")))
            .unwrap();
        db.insert_assignment(&base_assignment("asn_001", "evt_001", "emp_001"))
            .unwrap();
        db
    }

    #[test]
    fn test_rebuild_writes_rows_and_summary() {
        let mut db = seeded_db();
        let summary = engine_without_overtime()
            .rebuild(&mut db, "2025-10-01", "2025-10-31")
            .unwrap();

        assert_eq!(summary.rows_inserted, 4);
        assert!(summary.missing_rates.is_empty());

        let rows = db.ledger_rows(date("2025-10-01"), date("2025-10-31")).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].id, "2025-10-07-evt_001-emp_001");
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut db = seeded_db();
        let engine = engine_without_overtime();

        let first = engine.rebuild(&mut db, "2025-10-01", "2025-10-31").unwrap();
        let rows_first = db.ledger_rows(date("2025-10-01"), date("2025-10-31")).unwrap();

        let second = engine.rebuild(&mut db, "2025-10-01", "2025-10-31").unwrap();
        let rows_second = db.ledger_rows(date("2025-10-01"), date("2025-10-31")).unwrap();

        assert_eq!(first, second);
        assert_eq!(rows_first, rows_second);
    }

    #[test]
    fn test_rebuild_empty_window_deletes_stale_rows() {
        let mut db = seeded_db();
        let engine = engine_without_overtime();
        engine.rebuild(&mut db, "2025-10-01", "2025-10-31").unwrap();

        // November has no events; a stale row planted there must be removed.
        let stale = LaborDailyRow {
            id: LaborDailyRow::row_id(date("2025-11-03"), "evt_gone", "emp_001"),
            job_id: "job_001".to_string(),
            job_name: "Riverside Apartments".to_string(),
            day: date("2025-11-03"),
            event_id: "evt_gone".to_string(),
            event_title: "Removed".to_string(),
            employee_id: "emp_001".to_string(),
            employee_name: "Maria Vasquez".to_string(),
            source_assignment_id: "asn_gone".to_string(),
            hours: dec("8"),
            regular_hours: dec("8"),
            overtime_hours: dec("0"),
            rate_usd: dec("25"),
            regular_cost_usd: dec("200.00"),
            overtime_cost_usd: dec("0.00"),
            total_cost_usd: dec("200.00"),
            note: None,
        };
        db.replace_ledger_window(date("2025-11-03"), date("2025-11-03"), &[stale])
            .unwrap();

        let summary = engine.rebuild(&mut db, "2025-11-01", "2025-11-30").unwrap();
        assert_eq!(summary.rows_inserted, 0);
        assert!(summary.missing_rates.is_empty());
        assert!(db.ledger_rows(date("2025-11-01"), date("2025-11-30")).unwrap().is_empty());

        // The October rows are outside the November window and survive.
        assert_eq!(db.ledger_rows(date("2025-10-01"), date("2025-10-31")).unwrap().len(), 4);
    }

    #[test]
    fn test_rebuild_reports_missing_rate_without_aborting() {
        let mut db = seeded_db();
        db.insert_employee(&employee("emp_norate", "Ghost Worker", None))
            .unwrap();
        db.insert_assignment(&base_assignment("asn_002", "evt_001", "emp_norate"))
            .unwrap();

        let summary = engine_without_overtime()
            .rebuild(&mut db, "2025-10-01", "2025-10-31")
            .unwrap();

        assert_eq!(summary.rows_inserted, 4);
        assert_eq!(summary.missing_rates.len(), 4); // one per event day
        assert!(summary
            .missing_rates
            .iter()
            .all(|m| m.employee_id == "emp_norate"));
    }
}
