//! Utility functions for CLI operations.
//!
//! Holds the global options shared by every command and the startup step
//! that resolves configuration before dispatch.

use crate::error::CliError;
use mcs::{ConfigFormat, ConfigResolver, Logger, Resolution};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger before dispatch
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file; empty means default discovery.
    pub config: Option<PathBuf>,

    /// Declared format of the configuration file.
    pub config_format: ConfigFormat,
}

impl GlobalOptions {
    /// Build options from raw flag values.
    ///
    /// An empty `--config` value is treated as if the flag were absent.
    pub fn new(verbose: bool, quiet: bool, config: Option<String>, format: ConfigFormat) -> Self {
        Self {
            verbose,
            quiet,
            config: config.filter(|c| !c.is_empty()).map(PathBuf::from),
            config_format: format,
        }
    }
}

/// Resolve configuration for this run.
///
/// # Errors
///
/// Only fails when the executable's directory is needed and cannot be
/// determined.
pub fn resolve_configuration(global: &GlobalOptions) -> Result<Resolution, CliError> {
    ConfigResolver::new()
        .with_format(global.config_format)
        .resolve(global.config.as_deref())
        .map_err(CliError::from)
}

/// Tell the operator which file was used and what went wrong, if anything.
pub fn report_resolution(logger: &Logger, resolution: &Resolution) {
    if let Some(path) = &resolution.config_file_used {
        logger.notice(&format!("Using config file: {}", path.display()));
    }
    for key in &resolution.env_overrides {
        logger.debug(&format!("'{key}' set from environment"));
    }
}
