#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # mcs
//!
//! Core library for the PMF MCS (Motion Control Software) command-line tool.
//!
//! The library resolves the program's configuration once at startup and
//! hands it to every component as an immutable value.
//!
//! ## Core Types
//!
//! - [`ConfigResolver`] and [`Resolution`]: layered configuration resolution
//! - [`ResolvedConfig`]: the immutable merged key/value configuration
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use mcs::ResolvedConfig;
//! use serde_json::json;
//!
//! fn max_speed(config: &ResolvedConfig) -> i64 {
//!     config.get_i64("speed").unwrap_or(0)
//! }
//!
//! let config = ResolvedConfig::from_value(json!({"speed": 10})).unwrap();
//! assert_eq!(max_speed(&config), 10);
//! ```

pub mod config;
pub mod error;
pub mod logging;

// Re-export key types at crate root for convenience
pub use config::{ConfigFormat, ConfigResolver, ConfigSource, Resolution, ResolvedConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
