//! Ledger rebuild orchestration.
//!
//! This module contains the aggregation driver that walks every event
//! overlapping a date window through the calculation components and
//! atomically replaces the ledger rows for that window.

mod driver;

pub use driver::{AggregationEngine, RebuildInputs};
