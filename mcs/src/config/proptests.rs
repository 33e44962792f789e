//! Property-based tests for configuration resolution.

use super::environment::EnvironmentConfig;
use super::resolver::ConfigResolver;
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;

// Keys are lowercase so no two of them share an environment variable name.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("JSON has no NaN or infinity", |f| f.is_finite())
            .prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn object_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    // A valid file with no matching environment resolves to exactly its contents
    #[test]
    fn explicit_file_resolves_to_its_contents(data in object_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let resolution = ConfigResolver::new()
            .with_search_dir(dir.path())
            .skip_env()
            .resolve(Some(&path))
            .unwrap();

        prop_assert_eq!(resolution.config.as_map(), &data);
        prop_assert!(resolution.env_overrides.is_empty());
        prop_assert!(resolution.diagnostics.is_empty());
    }

    // Environment values win over file values for every key present in both
    #[test]
    fn environment_wins_over_file(
        file in prop::collection::btree_map(key_strategy(), any::<i64>(), 1..8),
        overrides in prop::collection::btree_map(key_strategy(), any::<i64>(), 0..8),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let data: Map<String, Value> = file
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(*v)))
            .collect();
        fs::write(dir.path().join("mcs.json"), serde_json::to_string(&data).unwrap()).unwrap();

        let env = EnvironmentConfig::from_vars(
            overrides.iter().map(|(k, v)| (k.to_ascii_uppercase(), v.to_string())),
        );
        let resolution = ConfigResolver::new()
            .with_search_dir(dir.path())
            .with_environment(env)
            .resolve(None)
            .unwrap();

        let expected: BTreeMap<&String, i64> = file
            .iter()
            .map(|(k, v)| (k, overrides.get(k).copied().unwrap_or(*v)))
            .collect();
        prop_assert_eq!(resolution.config.len(), expected.len());
        for (key, value) in expected {
            prop_assert_eq!(resolution.config.get_i64(key), Some(value));
        }
    }

    // Variables for keys the file does not contain are never pulled in
    #[test]
    fn unrecognized_variables_are_ignored(
        overrides in prop::collection::btree_map(key_strategy(), any::<i64>(), 0..8),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let env = EnvironmentConfig::from_vars(
            overrides.iter().map(|(k, v)| (k.to_ascii_uppercase(), v.to_string())),
        );

        let resolution = ConfigResolver::new()
            .with_search_dir(dir.path())
            .with_environment(env)
            .resolve(None)
            .unwrap();

        prop_assert!(resolution.config.is_empty());
    }
}
