//! SQLite persistence for the Labor Daily Aggregation Engine.
//!
//! This module wraps a `rusqlite` connection with the schema and queries the
//! engine needs: read-only access to the upstream scheduling tables (jobs,
//! events, assignments, employees, hourly rates) and the two ledger
//! operations the driver performs — delete-by-day-range and create-many,
//! always together inside one transaction.

mod database;
mod ledger;
mod queries;

pub use database::Database;
