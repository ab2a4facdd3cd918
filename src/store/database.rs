//! Database connection and schema management.

use std::path::Path;

use rusqlite::Connection;

use crate::error::EngineResult;

/// SQL to create all tables the engine touches.
///
/// The upstream tables (jobs, events, assignments, employees, hourly_rates)
/// are owned by external subsystems; they are created here so tests and
/// fresh deployments have a complete schema to work against. Timestamps are
/// stored as UTC `%Y-%m-%dT%H:%M:%SZ` text, days as `%Y-%m-%d` text (ISO
/// ordering makes day-range scans plain string comparisons), and decimals
/// as text for exact round-trips.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS jobs (
    id   TEXT PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS events (
    id        TEXT PRIMARY KEY,
    job_id    TEXT NOT NULL REFERENCES jobs(id),
    title     TEXT NOT NULL,
    starts_at TEXT NOT NULL,
    ends_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_events_interval ON events (starts_at, ends_at);

CREATE TABLE IF NOT EXISTS assignments (
    id           TEXT PRIMARY KEY,
    event_id     TEXT NOT NULL REFERENCES events(id),
    employee_id  TEXT NOT NULL,
    day_override TEXT,
    hours        TEXT,
    note         TEXT
);
CREATE INDEX IF NOT EXISTS idx_assignments_event ON assignments (event_id);

CREATE TABLE IF NOT EXISTS employees (
    id                  TEXT PRIMARY KEY,
    name                TEXT NOT NULL,
    default_hourly_rate TEXT
);

CREATE TABLE IF NOT EXISTS hourly_rates (
    employee_id    TEXT NOT NULL,
    effective_date TEXT NOT NULL,
    rate           TEXT NOT NULL,
    PRIMARY KEY (employee_id, effective_date)
);

CREATE TABLE IF NOT EXISTS labor_daily (
    id                   TEXT PRIMARY KEY,
    job_id               TEXT NOT NULL,
    job_name             TEXT NOT NULL,
    day                  TEXT NOT NULL,
    event_id             TEXT NOT NULL,
    event_title          TEXT NOT NULL,
    employee_id          TEXT NOT NULL,
    employee_name        TEXT NOT NULL,
    source_assignment_id TEXT NOT NULL,
    hours                TEXT NOT NULL,
    regular_hours        TEXT NOT NULL,
    overtime_hours       TEXT NOT NULL,
    rate_usd             TEXT NOT NULL,
    regular_cost_usd     TEXT NOT NULL,
    overtime_cost_usd    TEXT NOT NULL,
    total_cost_usd       TEXT NOT NULL,
    note                 TEXT
);
CREATE INDEX IF NOT EXISTS idx_labor_daily_day ON labor_daily (day);
";

/// A SQLite database holding the scheduling inputs and the labor ledger.
///
/// # Example
///
/// ```
/// use labor_engine::store::Database;
///
/// let db = Database::open_in_memory().unwrap();
/// assert!(db.load_employees().unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
}

impl Database {
    /// Opens (creating if needed) a database file and ensures the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory database with the full schema; used by tests.
    pub fn open_in_memory() -> EngineResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> EngineResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}
