//! Supported configuration file formats.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared format of a configuration file.
///
/// The resolver is told the format up front; file extensions are only used to
/// build default file names, never to pick a parser.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// JSON document.
    #[default]
    Json,
    /// YAML document.
    Yaml,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Conventional file extensions, in discovery order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcs::config::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::Json.extensions(), &["json"]);
    /// assert_eq!(ConfigFormat::Yaml.extensions(), &["yaml", "yml"]);
    /// ```
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
            Self::Toml => &["toml"],
        }
    }

    /// Parses a document into a generic value tree.
    ///
    /// The root is not checked here; callers decide whether a non-mapping
    /// root is acceptable.
    ///
    /// # Errors
    ///
    /// Returns the parser's message if `contents` is not valid for this
    /// format.
    pub fn parse(self, contents: &str) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            Self::Yaml => {
                // An empty YAML document is null rather than an error.
                if contents.trim().is_empty() {
                    return Ok(Value::Object(serde_json::Map::new()));
                }
                serde_yaml::from_str(contents).map_err(|e| e.to_string())
            }
            Self::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        };
        f.write_str(name)
    }
}
