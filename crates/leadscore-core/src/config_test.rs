use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use crate::config::build_app_config_for_test as build_app_config;
use crate::ConfigError;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn empty_env_yields_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.rules_path.is_none());
    assert!(cfg.fuzzy_threshold.is_none());
}

#[test]
fn log_level_override() {
    let mut map = HashMap::new();
    map.insert("LEADSCORE_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn rules_path_override() {
    let mut map = HashMap::new();
    map.insert("LEADSCORE_RULES_PATH", "/etc/leadscore/rules.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.rules_path,
        Some(PathBuf::from("/etc/leadscore/rules.yaml"))
    );
}

#[test]
fn fuzzy_threshold_parses() {
    let mut map = HashMap::new();
    map.insert("LEADSCORE_FUZZY_THRESHOLD", "0.8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.fuzzy_threshold, Some(0.8));
}

#[test]
fn fuzzy_threshold_rejects_non_numeric() {
    let mut map = HashMap::new();
    map.insert("LEADSCORE_FUZZY_THRESHOLD", "high");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCORE_FUZZY_THRESHOLD"),
        "expected InvalidEnvVar, got: {result:?}"
    );
}

#[test]
fn fuzzy_threshold_rejects_out_of_range() {
    let mut map = HashMap::new();
    map.insert("LEADSCORE_FUZZY_THRESHOLD", "1.3");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { .. })),
        "expected InvalidEnvVar, got: {result:?}"
    );
}
