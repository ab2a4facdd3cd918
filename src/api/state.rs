//! Application state for the Labor Daily Aggregation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex};

use crate::aggregation::AggregationEngine;
use crate::store::Database;

/// Shared application state.
///
/// Contains the configured aggregation engine and the database connection.
/// The database sits behind a mutex: a rebuild is a full-window replace, so
/// concurrent rebuilds over overlapping windows must be serialized.
#[derive(Clone)]
pub struct AppState {
    /// The configured aggregation engine.
    engine: Arc<AggregationEngine>,
    /// The database connection, serialized across rebuilds.
    db: Arc<Mutex<Database>>,
}

impl AppState {
    /// Creates a new application state from an engine and database.
    pub fn new(engine: AggregationEngine, db: Database) -> Self {
        Self {
            engine: Arc::new(engine),
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Returns a reference to the aggregation engine.
    pub fn engine(&self) -> &AggregationEngine {
        &self.engine
    }

    /// Returns the shared database handle.
    pub fn db(&self) -> &Mutex<Database> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
