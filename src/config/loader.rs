//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file and validating it into an
//! [`EngineConfig`].

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, OvertimePolicy};

/// Raw overtime section as it appears in the YAML file.
#[derive(Debug, Clone, Deserialize)]
struct OvertimeFile {
    /// Daily hours threshold beyond which overtime applies.
    daily_threshold_hours: Decimal,
    /// Cost multiplier applied to overtime hours.
    multiplier: Decimal,
}

/// Raw configuration file structure.
#[derive(Debug, Clone, Deserialize)]
struct EngineConfigFile {
    /// IANA time zone name (e.g. "America/New_York").
    timezone: String,
    /// Default daily hours cap for assignments without explicit hours.
    default_day_hours_cap: Decimal,
    /// Optional overtime policy; omit to disable overtime splitting.
    #[serde(default)]
    overtime: Option<OvertimeFile>,
}

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads a YAML configuration file and validates it.
///
/// # File Structure
///
/// ```text
/// timezone: America/New_York
/// default_day_hours_cap: 8
/// overtime:
///   daily_threshold_hours: 8
///   multiplier: 1.5
/// ```
///
/// # Example
///
/// ```no_run
/// use labor_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
/// println!("Day cap: {}h", loader.config().default_day_hours_cap);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g., "./config/engine.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - Any value is out of range (`InvalidConfig`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use labor_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/engine.yaml")?;
    /// # Ok::<(), labor_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let file: EngineConfigFile =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        let config = Self::validate(file)?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration, bypassing file I/O.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the validated engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates the raw file values into an [`EngineConfig`].
    fn validate(file: EngineConfigFile) -> EngineResult<EngineConfig> {
        let timezone = Tz::from_str(&file.timezone).map_err(|_| EngineError::InvalidConfig {
            field: "timezone".to_string(),
            message: format!("'{}' is not a known IANA time zone", file.timezone),
        })?;

        if file.default_day_hours_cap <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "default_day_hours_cap".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let overtime = match file.overtime {
            None => None,
            Some(ot) => {
                if ot.daily_threshold_hours <= Decimal::ZERO {
                    return Err(EngineError::InvalidConfig {
                        field: "overtime.daily_threshold_hours".to_string(),
                        message: "must be greater than 0".to_string(),
                    });
                }
                if ot.multiplier <= Decimal::ONE {
                    return Err(EngineError::InvalidConfig {
                        field: "overtime.multiplier".to_string(),
                        message: "must be greater than 1".to_string(),
                    });
                }
                Some(OvertimePolicy {
                    daily_threshold_hours: ot.daily_threshold_hours,
                    multiplier: ot.multiplier,
                })
            }
        };

        Ok(EngineConfig {
            timezone,
            default_day_hours_cap: file.default_day_hours_cap,
            overtime,
        })
    }
}
