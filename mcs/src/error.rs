//! Error types for the mcs library.
//!
//! Only [`Error::Startup`] is fatal during configuration resolution. The
//! remaining configuration variants are recoverable: the resolver records them
//! as diagnostics and continues with whatever data it could obtain.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigFormat;

/// Result type alias for operations that may fail with an mcs error.
///
/// # Examples
///
/// ```
/// use mcs::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(10)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the mcs library.
#[derive(Debug, Error)]
pub enum Error {
    /// The program cannot locate itself, so no default configuration
    /// directory exists.
    #[error("cannot determine executable location: {reason}")]
    Startup {
        /// Why the location could not be determined.
        reason: String,
    },

    /// No configuration file exists at the given location.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// The path that was probed.
        path: PathBuf,
    },

    /// A configuration file exists but could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    ConfigRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid for its declared format.
    #[error("invalid {format} in configuration file {}: {message}", path.display())]
    ConfigParse {
        /// The offending file.
        path: PathBuf,
        /// The format the file was parsed as.
        format: ConfigFormat,
        /// Parser message.
        message: String,
    },

    /// An environment variable could not be converted to the type of the
    /// value it overrides.
    #[error("environment variable {variable} for '{key}': {message}")]
    EnvCoercion {
        /// The configuration key being overridden.
        key: String,
        /// The environment variable name as found.
        variable: String,
        /// A description of the conversion failure.
        message: String,
    },

    /// A key could not be placed in the configuration tree.
    #[error("cannot set configuration key '{key}': {message}")]
    KeyConflict {
        /// The dotted key.
        key: String,
        /// A description of the conflict.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Returns true if this error must abort startup.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Startup { .. })
    }

    /// Returns true if this error represents a missing configuration file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ConfigNotFound { .. } => true,
            Self::Io(e) | Self::ConfigRead { source: e, .. } => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
