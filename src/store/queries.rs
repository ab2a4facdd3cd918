//! Reads and seed writes for the upstream scheduling tables.
//!
//! The engine only ever reads these tables during a rebuild; the insert
//! helpers exist for tests and for callers seeding a fresh database.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::{Row, params, params_from_iter};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::EngineResult;
use crate::models::{Assignment, Employee, Event, HourlyRate};

use super::database::Database;

const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DAY_FORMAT: &str = "%Y-%m-%d";

pub(super) fn utc_to_db(instant: DateTime<Utc>) -> String {
    instant.format(UTC_FORMAT).to_string()
}

pub(super) fn utc_from_db(index: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, UTC_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
        })
}

pub(super) fn day_to_db(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub(super) fn day_from_db(index: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DAY_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub(super) fn decimal_from_db(index: usize, value: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn map_event(row: &Row) -> rusqlite::Result<Event> {
    let starts_at: String = row.get("starts_at")?;
    let ends_at: String = row.get("ends_at")?;

    Ok(Event {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        job_name: row.get("job_name")?,
        title: row.get("title")?,
        starts_at: utc_from_db(4, &starts_at)?,
        ends_at: utc_from_db(5, &ends_at)?,
    })
}

fn map_assignment(row: &Row) -> rusqlite::Result<Assignment> {
    let day_override: Option<String> = row.get("day_override")?;
    let hours: Option<String> = row.get("hours")?;

    Ok(Assignment {
        id: row.get("id")?,
        event_id: row.get("event_id")?,
        employee_id: row.get("employee_id")?,
        day_override: day_override.map(|s| day_from_db(3, &s)).transpose()?,
        hours: hours.map(|s| decimal_from_db(4, &s)).transpose()?,
        note: row.get("note")?,
    })
}

fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    let default_hourly_rate: Option<String> = row.get("default_hourly_rate")?;

    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        default_hourly_rate: default_hourly_rate
            .map(|s| decimal_from_db(2, &s))
            .transpose()?,
    })
}

fn map_hourly_rate(row: &Row) -> rusqlite::Result<HourlyRate> {
    let effective_date: String = row.get("effective_date")?;
    let rate: String = row.get("rate")?;

    Ok(HourlyRate {
        employee_id: row.get("employee_id")?,
        effective_date: day_from_db(1, &effective_date)?,
        rate: decimal_from_db(2, &rate)?,
    })
}

impl Database {
    /// Fetches all events whose `[starts_at, ends_at)` interval overlaps the
    /// given UTC window, joined against jobs for the denormalized job name.
    ///
    /// Results are ordered by start instant then id so the rebuild emits
    /// rows deterministically.
    pub fn events_overlapping(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> EngineResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.job_id, j.name AS job_name, e.title, e.starts_at, e.ends_at
             FROM events e
             JOIN jobs j ON j.id = e.job_id
             WHERE e.starts_at < ?2 AND e.ends_at > ?1
             ORDER BY e.starts_at ASC, e.id ASC",
        )?;

        let rows = stmt.query_map(
            params![utc_to_db(window_start), utc_to_db(window_end)],
            map_event,
        )?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Fetches all assignments belonging to the given events.
    pub fn assignments_for_events(&self, event_ids: &[String]) -> EngineResult<Vec<Assignment>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; event_ids.len()].join(", ");
        let sql = format!(
            "SELECT id, event_id, employee_id, day_override, hours, note
             FROM assignments
             WHERE event_id IN ({})
             ORDER BY id ASC",
            placeholders
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(event_ids), map_assignment)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Loads the full employee roster.
    pub fn load_employees(&self) -> EngineResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, default_hourly_rate FROM employees ORDER BY id ASC")?;
        let rows = stmt.query_map([], map_employee)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Loads the full effective-dated rate history.
    pub fn load_rate_history(&self) -> EngineResult<Vec<HourlyRate>> {
        let mut stmt = self.conn.prepare(
            "SELECT employee_id, effective_date, rate
             FROM hourly_rates
             ORDER BY employee_id ASC, effective_date ASC",
        )?;
        let rows = stmt.query_map([], map_hourly_rate)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Inserts a job row.
    pub fn insert_job(&self, id: &str, name: &str) -> EngineResult<()> {
        self.conn
            .execute("INSERT INTO jobs (id, name) VALUES (?1, ?2)", params![id, name])?;
        Ok(())
    }

    /// Inserts an event row.
    pub fn insert_event(
        &self,
        id: &str,
        job_id: &str,
        title: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO events (id, job_id, title, starts_at, ends_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, job_id, title, utc_to_db(starts_at), utc_to_db(ends_at)],
        )?;
        Ok(())
    }

    /// Inserts an assignment row.
    pub fn insert_assignment(&self, assignment: &Assignment) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO assignments (id, event_id, employee_id, day_override, hours, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                assignment.id,
                assignment.event_id,
                assignment.employee_id,
                assignment.day_override.map(day_to_db),
                assignment.hours.map(|h| h.to_string()),
                assignment.note,
            ],
        )?;
        Ok(())
    }

    /// Inserts an employee row.
    pub fn insert_employee(&self, employee: &Employee) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO employees (id, name, default_hourly_rate) VALUES (?1, ?2, ?3)",
            params![
                employee.id,
                employee.name,
                employee.default_hourly_rate.map(|r| r.to_string()),
            ],
        )?;
        Ok(())
    }

    /// Inserts a rate history entry.
    pub fn insert_hourly_rate(&self, rate: &HourlyRate) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO hourly_rates (employee_id, effective_date, rate) VALUES (?1, ?2, ?3)",
            params![
                rate.employee_id,
                day_to_db(rate.effective_date),
                rate.rate.to_string(),
            ],
        )?;
        Ok(())
    }
}
