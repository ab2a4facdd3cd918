//! HTTP request handlers for the Labor Daily Aggregation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::RebuildRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rebuild", post(rebuild_handler))
        .with_state(state)
}

/// Handler for POST /rebuild endpoint.
///
/// Accepts a date window and returns the rebuild summary: rows inserted
/// plus the missing-rate pairings that were skipped.
async fn rebuild_handler(
    State(state): State<AppState>,
    payload: Result<Json<RebuildRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rebuild request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    let result = {
        // A rebuild is a full-window replace; the mutex keeps overlapping
        // rebuilds from racing on which replacement wins.
        let mut db = match state.db().lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!(correlation_id = %correlation_id, "Database lock poisoned");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(header::CONTENT_TYPE, "application/json")],
                    Json(ApiError::new(
                        "ENGINE_UNAVAILABLE",
                        "A previous rebuild panicked; restart the service",
                    )),
                )
                    .into_response();
            }
        };
        state
            .engine()
            .rebuild(&mut db, &request.start_date, &request.end_date)
    };

    match result {
        Ok(summary) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                start_date = %request.start_date,
                end_date = %request.end_date,
                rows_inserted = summary.rows_inserted,
                missing_rates = summary.missing_rates.len(),
                duration_us = duration.as_micros(),
                "Rebuild completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(summary),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rebuild failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
