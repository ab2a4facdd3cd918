//! HTTP API module for the Labor Daily Aggregation Engine.
//!
//! This module provides the REST endpoint batch jobs and admin triggers use
//! to rebuild the labor ledger for a date window.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::RebuildRequest;
pub use response::ApiError;
pub use state::AppState;
