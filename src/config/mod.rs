//! Configuration loading and management for the Labor Daily Aggregation Engine.
//!
//! This module provides the engine configuration (organizational time zone,
//! default daily hours cap, overtime policy) and a YAML loader for it. The
//! configuration is an explicit struct handed to the aggregation driver at
//! construction, so multiple configurations can be tested in isolation.
//!
//! # Example
//!
//! ```no_run
//! use labor_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Organizational zone: {}", config.config().timezone);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, OvertimePolicy};
