//! Layered configuration resolution.
//!
//! Resolution runs once at startup: pick the source file, load it, overlay
//! the environment, and hand back an immutable [`ResolvedConfig`].

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::{split_key, EnvironmentConfig};
use crate::config::format::ConfigFormat;
use crate::config::loader::{ConfigLoader, ConfigSource, LoadOutcome, DEFAULT_CONFIG_NAME};
use crate::config::resolved::ResolvedConfig;
use crate::error::{Error, Result};

/// Outcome of [`ConfigResolver::resolve`].
#[derive(Debug)]
pub struct Resolution {
    /// The merged configuration.
    pub config: ResolvedConfig,
    /// The source descriptor that was chosen.
    pub source: ConfigSource,
    /// The file actually loaded, if any.
    pub config_file_used: Option<PathBuf>,
    /// Dotted keys whose values came from the environment.
    pub env_overrides: Vec<String>,
    /// Recoverable problems encountered along the way.
    pub diagnostics: Vec<Error>,
}

impl Resolution {
    /// Returns true if any recoverable problem was reported.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Discard the bookkeeping and keep only the configuration.
    #[must_use]
    pub fn into_config(self) -> ResolvedConfig {
        self.config
    }
}

/// Resolves configuration from a file and the environment.
///
/// Precedence, highest first: environment variable, file value, absent.
///
/// # Examples
///
/// ```
/// use mcs::config::{ConfigResolver, EnvironmentConfig};
/// use std::fs;
///
/// let dir = tempfile::tempdir().unwrap();
/// fs::write(dir.path().join("mcs.json"), r#"{"speed": 10}"#).unwrap();
///
/// let resolution = ConfigResolver::new()
///     .with_search_dir(dir.path())
///     .with_environment(EnvironmentConfig::from_vars([("SPEED", "20")]))
///     .resolve(None)
///     .unwrap();
///
/// assert_eq!(resolution.config.get_i64("speed"), Some(20));
/// assert_eq!(resolution.config_file_used, Some(dir.path().join("mcs.json")));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    format: ConfigFormat,
    config_name: String,
    search_dir: Option<PathBuf>,
    env_prefix: Option<String>,
    keys: Vec<Vec<String>>,
    environment: Option<EnvironmentConfig>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// A resolver for `mcs.json` next to the executable, reading the process
    /// environment without a prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            format: ConfigFormat::default(),
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            search_dir: None,
            env_prefix: None,
            keys: Vec::new(),
            environment: None,
        }
    }

    /// Declare the format of the configuration file.
    #[must_use]
    pub fn with_format(mut self, format: ConfigFormat) -> Self {
        self.format = format;
        self
    }

    /// Change the default file stem.
    #[must_use]
    pub fn with_config_name(mut self, name: &str) -> Self {
        self.config_name = name.to_string();
        self
    }

    /// Search this directory instead of the executable's.
    #[must_use]
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = Some(dir.into());
        self
    }

    /// Only read environment variables named `PREFIX_<KEY>`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Recognize a dotted key even when the file does not contain it.
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        let path = split_key(key);
        if !path.is_empty() {
            self.keys.push(path);
        }
        self
    }

    /// Recognize several dotted keys.
    #[must_use]
    pub fn with_keys<'a>(self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        keys.into_iter().fold(self, Self::with_key)
    }

    /// Use this environment snapshot instead of the process environment.
    #[must_use]
    pub fn with_environment(mut self, environment: EnvironmentConfig) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Ignore environment variables entirely.
    #[must_use]
    pub fn skip_env(self) -> Self {
        self.with_environment(EnvironmentConfig::default())
    }

    /// Decide which file to load.
    ///
    /// A `None` or empty `explicit_path` selects the default location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Startup`] if the default location is needed and the
    /// executable's directory cannot be determined.
    pub fn source(&self, explicit_path: Option<&Path>) -> Result<ConfigSource> {
        match explicit_path.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Ok(ConfigSource::ExplicitPath {
                path: path.to_path_buf(),
                format: self.format,
            }),
            None => {
                let dir = match &self.search_dir {
                    Some(dir) => dir.clone(),
                    None => executable_dir()?,
                };
                Ok(ConfigSource::DefaultLocation {
                    dir,
                    name: self.config_name.clone(),
                    format: self.format,
                })
            }
        }
    }

    /// Resolve the configuration.
    ///
    /// Missing or broken files never fail resolution; they leave the file
    /// layer empty and broken ones are reported in
    /// [`Resolution::diagnostics`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Startup`] if the executable's directory is needed and
    /// cannot be determined.
    pub fn resolve(&self, explicit_path: Option<&Path>) -> Result<Resolution> {
        let source = self.source(explicit_path)?;
        log::debug!("Resolving configuration from {source}");

        let mut diagnostics = Vec::new();
        let (mut data, config_file_used) = match ConfigLoader::load(&source) {
            LoadOutcome::Loaded { path, data } => (data, Some(path)),
            LoadOutcome::NotFound => {
                log::debug!("No configuration file found; continuing without one");
                (serde_json::Map::new(), None)
            }
            LoadOutcome::Failed(e) => {
                log::warn!("{e}; continuing without configuration file");
                diagnostics.push(e);
                (serde_json::Map::new(), None)
            }
        };

        let environment = match &self.environment {
            Some(environment) => environment.clone(),
            None => EnvironmentConfig::from_process(),
        };
        let environment = match &self.env_prefix {
            Some(prefix) => environment.with_prefix(prefix),
            None => environment,
        };

        let overlay = environment.overlay(&mut data, &self.keys);
        diagnostics.extend(overlay.diagnostics);

        Ok(Resolution {
            config: ResolvedConfig::from(data),
            source,
            config_file_used,
            env_overrides: overlay.overridden,
            diagnostics,
        })
    }
}

/// Directory containing the running executable.
///
/// # Errors
///
/// Returns [`Error::Startup`] if the executable path is unavailable or has no
/// parent directory.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| Error::Startup {
        reason: e.to_string(),
    })?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::Startup {
            reason: format!("{} has no parent directory", exe.display()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn resolver_in(dir: &Path) -> ConfigResolver {
        ConfigResolver::new().with_search_dir(dir).skip_env()
    }

    #[test]
    fn test_executable_dir_exists() {
        let dir = executable_dir().unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_source_explicit_path() {
        let source = ConfigResolver::new()
            .with_format(ConfigFormat::Yaml)
            .source(Some(Path::new("/etc/mcs/custom.json")))
            .unwrap();
        assert_eq!(
            source,
            ConfigSource::ExplicitPath {
                path: PathBuf::from("/etc/mcs/custom.json"),
                format: ConfigFormat::Yaml,
            }
        );
    }

    #[test]
    fn test_source_empty_path_uses_default_location() {
        let source = resolver_in(Path::new("/srv/mcs"))
            .source(Some(Path::new("")))
            .unwrap();
        assert_eq!(
            source,
            ConfigSource::DefaultLocation {
                dir: PathBuf::from("/srv/mcs"),
                name: "mcs".to_string(),
                format: ConfigFormat::Json,
            }
        );
    }

    #[test]
    fn test_source_defaults_to_executable_dir() {
        let source = ConfigResolver::new().source(None).unwrap();
        match source {
            ConfigSource::DefaultLocation { dir, .. } => {
                assert_eq!(dir, executable_dir().unwrap());
            }
            other => panic!("expected default location, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        fs::write(&path, r#"{"speed": 10, "axis": {"name": "x"}}"#).unwrap();

        let resolution = resolver_in(temp_dir.path()).resolve(Some(&path)).unwrap();
        assert_eq!(
            resolution.config.to_value(),
            json!({"speed": 10, "axis": {"name": "x"}})
        );
        assert_eq!(resolution.config_file_used, Some(path));
        assert!(resolution.env_overrides.is_empty());
        assert!(!resolution.has_diagnostics());
    }

    #[test]
    fn test_resolve_missing_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let resolution = resolver_in(temp_dir.path()).resolve(None).unwrap();
        assert!(resolution.config.is_empty());
        assert!(resolution.config_file_used.is_none());
        assert!(!resolution.has_diagnostics());
    }

    #[test]
    fn test_resolve_missing_explicit_file_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.json");

        let resolution = resolver_in(temp_dir.path()).resolve(Some(&missing)).unwrap();
        assert!(resolution.config.is_empty());
        assert!(!resolution.has_diagnostics());
    }

    #[test]
    fn test_resolve_malformed_file_reports_diagnostic() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mcs.json");
        fs::write(&path, "{ speed: 10 ").unwrap();

        let resolution = resolver_in(temp_dir.path()).resolve(None).unwrap();
        assert!(resolution.config.is_empty());
        assert!(resolution.config_file_used.is_none());
        assert_eq!(resolution.diagnostics.len(), 1);
        assert!(matches!(resolution.diagnostics[0], Error::ConfigParse { .. }));
        assert!(!resolution.diagnostics[0].is_fatal());
    }

    #[test]
    fn test_resolve_does_not_fall_back_to_default_when_explicit_missing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("mcs.json"), r#"{"speed": 10}"#).unwrap();

        let resolution = resolver_in(temp_dir.path())
            .resolve(Some(&temp_dir.path().join("other.json")))
            .unwrap();
        assert!(resolution.config.is_empty());
    }

    #[test]
    fn test_resolve_environment_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("mcs.json"), r#"{"speed": 10}"#).unwrap();

        let resolution = resolver_in(temp_dir.path())
            .with_environment(EnvironmentConfig::from_vars([("SPEED", "20")]))
            .resolve(None)
            .unwrap();
        assert_eq!(resolution.config.to_value(), json!({"speed": 20}));
        assert_eq!(resolution.env_overrides, vec!["speed".to_string()]);
    }

    #[test]
    fn test_resolve_with_prefix() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("mcs.json"), r#"{"speed": 10}"#).unwrap();

        let env = EnvironmentConfig::from_vars([("SPEED", "20"), ("MCS_SPEED", "30")]);
        let resolution = resolver_in(temp_dir.path())
            .with_environment(env)
            .with_env_prefix("MCS")
            .resolve(None)
            .unwrap();
        assert_eq!(resolution.config.get_i64("speed"), Some(30));
    }

    #[test]
    fn test_resolve_registered_keys_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let env = EnvironmentConfig::from_vars([("SPEED", "20"), ("PORT", "/dev/ttyUSB0")]);

        let resolution = resolver_in(temp_dir.path())
            .with_environment(env)
            .with_keys(["speed", "port", "axis.name"])
            .resolve(None)
            .unwrap();
        assert_eq!(
            resolution.config.to_value(),
            json!({"speed": "20", "port": "/dev/ttyUSB0"})
        );
    }

    #[test]
    fn test_resolve_malformed_file_still_applies_environment() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("mcs.json"), "[").unwrap();

        let resolution = resolver_in(temp_dir.path())
            .with_environment(EnvironmentConfig::from_vars([("SPEED", "20")]))
            .with_key("speed")
            .resolve(None)
            .unwrap();
        assert_eq!(resolution.config.get_str("speed"), Some("20"));
        assert_eq!(resolution.diagnostics.len(), 1);
    }

    #[test]
    fn test_resolve_uses_declared_format_not_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "speed: 10\n").unwrap();

        let as_yaml = resolver_in(temp_dir.path())
            .with_format(ConfigFormat::Yaml)
            .resolve(Some(&path))
            .unwrap();
        assert_eq!(as_yaml.config.get_i64("speed"), Some(10));

        let as_json = resolver_in(temp_dir.path()).resolve(Some(&path)).unwrap();
        assert!(as_json.config.is_empty());
        assert!(as_json.has_diagnostics());
    }

    #[test]
    fn test_resolve_custom_config_name() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("motion.toml"), "speed = 7\n").unwrap();

        let resolution = resolver_in(temp_dir.path())
            .with_format(ConfigFormat::Toml)
            .with_config_name("motion")
            .resolve(None)
            .unwrap();
        assert_eq!(resolution.config.get_i64("speed"), Some(7));
    }

    #[test]
    fn test_into_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = resolver_in(temp_dir.path()).resolve(None).unwrap().into_config();
        assert_eq!(config, ResolvedConfig::empty());
    }
}
