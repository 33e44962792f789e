//! Configuration system for mcs.
//!
//! Configuration comes from at most one file plus environment variables.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Environment variables matching a recognized key
//! 2. The configuration file (explicit `--config` path, or `mcs.json` next to
//!    the executable)
//! 3. Absent
//!
//! A missing file is silent and a malformed one is reported as a diagnostic;
//! neither stops the program. Only failing to locate the executable is fatal.
//!
//! # Examples
//!
//! Programmatic resolution with a synthetic environment:
//!
//! ```
//! use mcs::config::{ConfigFormat, ConfigResolver, EnvironmentConfig};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let resolution = ConfigResolver::new()
//!     .with_format(ConfigFormat::Json)
//!     .with_search_dir(dir.path())
//!     .with_key("speed")
//!     .with_environment(EnvironmentConfig::from_vars([("SPEED", "20")]))
//!     .resolve(None)
//!     .unwrap();
//!
//! assert_eq!(resolution.config.get_str("speed"), Some("20"));
//! assert!(resolution.config_file_used.is_none());
//! ```

pub mod environment;
pub mod format;
pub mod loader;
pub mod resolved;
pub mod resolver;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use environment::{EnvironmentConfig, Overlay};
pub use format::ConfigFormat;
pub use loader::{ConfigLoader, ConfigSource, LoadOutcome, DEFAULT_CONFIG_NAME};
pub use resolved::ResolvedConfig;
pub use resolver::{executable_dir, ConfigResolver, Resolution};
