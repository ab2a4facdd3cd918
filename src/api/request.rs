//! Request types for the Labor Daily Aggregation Engine API.
//!
//! This module defines the JSON request structure for the `/rebuild`
//! endpoint.

use serde::{Deserialize, Serialize};

/// Request body for the `/rebuild` endpoint.
///
/// Dates arrive as strings and are validated by the engine before any
/// store access, so malformed input is rejected with a validation error
/// rather than a JSON type error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuildRequest {
    /// Inclusive window start, `YYYY-MM-DD`.
    pub start_date: String,
    /// Inclusive window end, `YYYY-MM-DD`.
    pub end_date: String,
}
