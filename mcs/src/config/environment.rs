//! Environment variable overrides for configuration values.
//!
//! A configuration key path maps to one environment variable name: the
//! optional prefix followed by the path segments, joined with `_` and compared
//! without regard to ASCII case. `motion.max_speed` is read from
//! `MOTION_MAX_SPEED` (or `MCS_MOTION_MAX_SPEED` with prefix `MCS`).
//!
//! Any character other than an ASCII letter, digit or `_` becomes `_`, so
//! `max-speed` and a literal `"axis.x"` key read `MAX_SPEED` and `AXIS_X`.

use std::collections::HashSet;
use std::env;

use serde_json::{Map, Number, Value};

use crate::error::Error;

/// Separator between key path segments in variable names.
const SEGMENT_SEPARATOR: &str = "_";

/// Snapshot of environment variables used to override configuration.
///
/// # Examples
///
/// ```
/// use mcs::config::EnvironmentConfig;
/// use serde_json::{json, Map};
///
/// let env = EnvironmentConfig::from_vars([("SPEED", "20")]);
/// let mut data = Map::new();
/// data.insert("speed".to_string(), json!(10));
///
/// let overlay = env.overlay(&mut data, &[]);
/// assert_eq!(data["speed"], json!(20));
/// assert_eq!(overlay.overridden, vec!["speed".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvironmentConfig {
    vars: Vec<(String, String)>,
    prefix: Option<String>,
}

/// What an overlay pass changed.
#[derive(Debug, Default)]
pub struct Overlay {
    /// Dotted keys whose values now come from the environment.
    pub overridden: Vec<String>,
    /// Recoverable problems found while applying overrides.
    pub diagnostics: Vec<Error>,
}

impl EnvironmentConfig {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_vars(
            env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build a snapshot from explicit name/value pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars: Vec<(String, String)> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        vars.sort();
        Self { vars, prefix: None }
    }

    /// Require variable names to start with `PREFIX_`.
    ///
    /// A trailing underscore on `prefix` is ignored; an empty prefix clears it.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches(SEGMENT_SEPARATOR);
        self.prefix = (!prefix.is_empty()).then(|| prefix.to_string());
        self
    }

    /// The configured prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Canonical (upper-case) variable name for a key path.
    ///
    /// ```
    /// use mcs::config::EnvironmentConfig;
    ///
    /// let env = EnvironmentConfig::default().with_prefix("mcs");
    /// let path = vec!["motion".to_string(), "max_speed".to_string()];
    /// assert_eq!(env.variable_name(&path), "MCS_MOTION_MAX_SPEED");
    /// ```
    #[must_use]
    pub fn variable_name(&self, path: &[String]) -> String {
        self.name_as_written(path).to_ascii_uppercase()
    }

    fn name_as_written(&self, path: &[String]) -> String {
        let joined = path.join(SEGMENT_SEPARATOR);
        let name = match &self.prefix {
            Some(prefix) => format!("{prefix}{SEGMENT_SEPARATOR}{joined}"),
            None => joined,
        };
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }

    /// Find the variable overriding `path`.
    ///
    /// Names match case-insensitively. When several variables match, the
    /// all-uppercase name wins, then the name exactly as the key is written,
    /// then the lexically first.
    #[must_use]
    pub fn lookup(&self, path: &[String]) -> Option<(&str, &str)> {
        let upper = self.variable_name(path);
        let as_written = self.name_as_written(path);

        // `vars` is sorted, and ties keep the first element.
        self.vars
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(&upper))
            .min_by_key(|(name, _)| {
                if *name == upper {
                    0
                } else if *name == as_written {
                    1
                } else {
                    2
                }
            })
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Apply overrides to `data` in place.
    ///
    /// Recognized keys are every leaf already in `data` plus each path in
    /// `registered`. A registered key that is missing from `data` is created,
    /// along with any missing parent mappings.
    pub fn overlay(&self, data: &mut Map<String, Value>, registered: &[Vec<String>]) -> Overlay {
        let mut overlay = Overlay::default();

        let mut recognized = Vec::new();
        collect_leaf_paths(data, &mut Vec::new(), &mut recognized);

        let mut seen: HashSet<String> = recognized.iter().map(|p| self.variable_name(p)).collect();
        for path in registered {
            if !path.is_empty() && seen.insert(self.variable_name(path)) {
                recognized.push(path.clone());
            }
        }

        for path in recognized {
            let Some((variable, raw)) = self.lookup(&path) else {
                continue;
            };
            let key = path.join(".");

            let value = match coerce(get_path(data, &path), raw) {
                Ok(value) => value,
                Err(message) => {
                    log::warn!("{variable} does not match the type of '{key}': {message}");
                    overlay.diagnostics.push(Error::EnvCoercion {
                        key: key.clone(),
                        variable: variable.to_string(),
                        message,
                    });
                    Value::String(raw.to_string())
                }
            };

            match set_path(data, &path, value) {
                Ok(()) => {
                    log::debug!("Configuration key '{key}' overridden by {variable}");
                    overlay.overridden.push(key);
                }
                Err(message) => {
                    log::warn!("Ignoring {variable}: {message}");
                    overlay.diagnostics.push(Error::KeyConflict { key, message });
                }
            }
        }

        overlay
    }
}

/// Split a dotted key into path segments.
#[must_use]
pub fn split_key(key: &str) -> Vec<String> {
    key.split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn collect_leaf_paths(map: &Map<String, Value>, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    for (key, value) in map {
        prefix.push(key.clone());
        match value {
            Value::Object(child) => collect_leaf_paths(child, prefix, out),
            _ => out.push(prefix.clone()),
        }
        prefix.pop();
    }
}

fn get_path<'a>(map: &'a Map<String, Value>, path: &[String]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = map;
    for segment in parents {
        current = current.get(segment)?.as_object()?;
    }
    current.get(last)
}

fn set_path(map: &mut Map<String, Value>, path: &[String], value: Value) -> Result<(), String> {
    let Some((last, parents)) = path.split_last() else {
        return Err("empty key".to_string());
    };

    let mut current = map;
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match entry {
            Value::Object(child) => child,
            _ => return Err(format!("'{segment}' is not a mapping")),
        };
    }

    if matches!(current.get(last), Some(Value::Object(child)) if !child.is_empty()) {
        return Err(format!("'{last}' is a mapping and cannot be replaced by a single value"));
    }

    current.insert(last.clone(), value);
    Ok(())
}

/// Convert a raw variable value to the type of the value it replaces.
fn coerce(existing: Option<&Value>, raw: &str) -> Result<Value, String> {
    match existing {
        Some(Value::Number(n)) if n.is_f64() => parse_float(raw).map(Value::Number),
        Some(Value::Number(_)) => parse_number(raw).map(Value::Number),
        Some(Value::Bool(_)) => parse_bool(raw).map(Value::Bool),
        Some(Value::Array(_)) => Ok(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        )),
        _ => Ok(Value::String(raw.to_string())),
    }
}

fn parse_number(s: &str) -> Result<Number, String> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Ok(n.into());
    }
    if let Ok(n) = s.parse::<u64>() {
        return Ok(n.into());
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| format!("expected a number, got '{s}'"))
}

fn parse_float(s: &str) -> Result<Number, String> {
    let s = s.trim();
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| format!("expected a number, got '{s}'"))
}

/// Parse a boolean value from a string.
///
/// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!(
            "invalid boolean value '{s}' (expected true/false/1/0/yes/no/on/off)"
        )),
    }
}
