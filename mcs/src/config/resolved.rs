//! The immutable result of configuration resolution.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Final key/value configuration after merging the file and the environment.
///
/// There are no mutating methods: once built, every reader sees the same
/// snapshot. Components receive it by reference; tests can build synthetic
/// instances from a JSON value.
///
/// Lookups take dotted keys (`motion.max_speed`). Each segment is matched
/// exactly first and then without regard to ASCII case.
///
/// # Examples
///
/// ```
/// use mcs::ResolvedConfig;
/// use serde_json::json;
///
/// let config = ResolvedConfig::from_value(json!({
///     "speed": 10,
///     "motion": {"axis": "x", "enabled": true}
/// }))
/// .unwrap();
///
/// assert_eq!(config.get_i64("speed"), Some(10));
/// assert_eq!(config.get_str("Motion.Axis"), Some("x"));
/// assert_eq!(config.get_bool("motion.enabled"), Some(true));
/// assert!(config.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    data: Map<String, Value>,
}

impl ResolvedConfig {
    /// An empty configuration.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a configuration from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            _ => Err(Error::Validation {
                field: "configuration".into(),
                message: "top-level value must be an object".into(),
            }),
        }
    }

    /// Look up a value by dotted key.
    ///
    /// A top-level key that itself contains dots (`"axis.x"`) is matched as a
    /// whole before the key is split into segments.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = lookup_segment(&self.data, key) {
            return Some(value);
        }
        let mut segments = key.split('.');
        let mut current = lookup_segment(&self.data, segments.next()?)?;
        for segment in segments {
            current = lookup_segment(current.as_object()?, segment)?;
        }
        Some(current)
    }

    /// String value at `key`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Integer value at `key`.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_i64()
    }

    /// Floating-point value at `key`. Integers are widened.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    /// Boolean value at `key`.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// Returns true if `key` resolves to a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there are no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the underlying mapping.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Copy the configuration into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// Deserialize the whole configuration into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the data does not fit `T`.
    ///
    /// ```
    /// use mcs::ResolvedConfig;
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Motion {
    ///     speed: u32,
    /// }
    ///
    /// let config = ResolvedConfig::from_value(json!({"speed": 20})).unwrap();
    /// let motion: Motion = config.deserialize().unwrap();
    /// assert_eq!(motion.speed, 20);
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.to_value()).map_err(|e| Error::Validation {
            field: "configuration".into(),
            message: e.to_string(),
        })
    }
}

impl From<Map<String, Value>> for ResolvedConfig {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

fn lookup_segment<'a>(map: &'a Map<String, Value>, segment: &str) -> Option<&'a Value> {
    map.get(segment).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(segment))
            .map(|(_, value)| value)
    })
}
