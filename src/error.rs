//! Error types for the Labor Daily Aggregation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a ledger rebuild.
//!
//! Missing-rate conditions are deliberately NOT represented here: an
//! (employee, day) pairing without a resolvable rate is accumulated in the
//! rebuild summary rather than aborting the run.

use thiserror::Error;

/// The main error type for the Labor Daily Aggregation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use labor_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range or unusable.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A date input was not a valid `YYYY-MM-DD` string.
    ///
    /// Raised during input validation, before any store access.
    #[error("Invalid date: '{value}' is not a YYYY-MM-DD calendar date")]
    InvalidDate {
        /// The rejected input string.
        value: String,
    },

    /// The requested window had its end before its start.
    ///
    /// Raised during input validation, before any store access.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// The requested window start.
        start: String,
        /// The requested window end.
        end: String,
    },

    /// The underlying store failed.
    ///
    /// Any store error during the ledger transaction aborts the rebuild;
    /// the transaction is rolled back in full and no partial ledger state
    /// is observable.
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "overtime.multiplier".to_string(),
            message: "must be greater than 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration field 'overtime.multiplier': must be greater than 1"
        );
    }

    #[test]
    fn test_invalid_date_displays_value() {
        let error = EngineError::InvalidDate {
            value: "2025-13-40".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date: '2025-13-40' is not a YYYY-MM-DD calendar date"
        );
    }

    #[test]
    fn test_invalid_date_range_displays_bounds() {
        let error = EngineError::InvalidDateRange {
            start: "2025-10-10".to_string(),
            end: "2025-10-01".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: start 2025-10-10 is after end 2025-10-01"
        );
    }

    #[test]
    fn test_store_error_wraps_rusqlite() {
        let error = EngineError::from(rusqlite::Error::InvalidQuery);
        assert!(error.to_string().starts_with("Store error:"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_date() -> EngineResult<()> {
            Err(EngineError::InvalidDate {
                value: "nope".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_date()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
