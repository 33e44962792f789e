//! Configuration file location and loading.
//!
//! A [`ConfigSource`] names which file to try. [`ConfigLoader`] reads and
//! parses it into a generic JSON object map.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::format::ConfigFormat;
use crate::error::{Error, Result};

/// Default configuration file stem.
pub const DEFAULT_CONFIG_NAME: &str = "mcs";

/// Which configuration file the resolver should attempt to load.
///
/// # Examples
///
/// ```
/// use mcs::config::{ConfigFormat, ConfigSource};
/// use std::path::PathBuf;
///
/// let source = ConfigSource::DefaultLocation {
///     dir: PathBuf::from("/opt/mcs/bin"),
///     name: "mcs".to_string(),
///     format: ConfigFormat::Json,
/// };
/// assert_eq!(
///     source.candidate_paths(),
///     vec![PathBuf::from("/opt/mcs/bin/mcs.json")]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file named on the command line.
    ExplicitPath {
        /// The file, used as given.
        path: PathBuf,
        /// Declared format of the file.
        format: ConfigFormat,
    },
    /// A default-named file searched for in a directory.
    DefaultLocation {
        /// Directory to search.
        dir: PathBuf,
        /// File stem, without extension.
        name: String,
        /// Declared format; its extensions complete the file name.
        format: ConfigFormat,
    },
}

impl ConfigSource {
    /// The declared format of this source.
    #[must_use]
    pub const fn format(&self) -> ConfigFormat {
        match self {
            Self::ExplicitPath { format, .. } | Self::DefaultLocation { format, .. } => *format,
        }
    }

    /// Files to try, in order. The first one that exists is loaded.
    #[must_use]
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        match self {
            Self::ExplicitPath { path, .. } => vec![path.clone()],
            Self::DefaultLocation { dir, name, format } => format
                .extensions()
                .iter()
                .map(|ext| dir.join(format!("{name}.{ext}")))
                .collect(),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitPath { path, format } => {
                write!(f, "explicit {format} file {}", path.display())
            }
            Self::DefaultLocation { dir, name, format } => {
                write!(f, "default {format} file '{name}' in {}", dir.display())
            }
        }
    }
}

/// Result of trying to load one configuration source.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A file was read and parsed.
    Loaded {
        /// The file that was loaded.
        path: PathBuf,
        /// Its top-level mapping.
        data: Map<String, Value>,
    },
    /// None of the candidate files exist.
    NotFound,
    /// A file exists but could not be used.
    Failed(Error),
}

/// Reads and parses configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the first existing candidate of `source`.
    ///
    /// Never fails outright: a missing file yields [`LoadOutcome::NotFound`]
    /// and any other problem is carried in [`LoadOutcome::Failed`].
    #[must_use]
    pub fn load(source: &ConfigSource) -> LoadOutcome {
        let format = source.format();

        for path in source.candidate_paths() {
            match Self::load_file(&path, format) {
                Ok(data) => return LoadOutcome::Loaded { path, data },
                Err(e) if e.is_not_found() => {
                    log::debug!("No configuration file at {}", path.display());
                }
                Err(e) => return LoadOutcome::Failed(e),
            }
        }

        LoadOutcome::NotFound
    }

    /// Load and parse a single file as `format`.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] if the file does not exist.
    /// - [`Error::ConfigRead`] if it exists but cannot be read.
    /// - [`Error::ConfigParse`] if it is not valid `format`, or its root is
    ///   not a mapping.
    pub fn load_file(path: &Path, format: ConfigFormat) -> Result<Map<String, Value>> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let parse_error = |message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format,
            message,
        };

        match format.parse(&contents).map_err(parse_error)? {
            Value::Object(map) => Ok(map),
            other => Err(parse_error(format!(
                "top-level value must be a mapping, found {}",
                value_kind(&other)
            ))),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
