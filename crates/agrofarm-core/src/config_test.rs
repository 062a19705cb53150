use std::collections::HashMap;
use std::env::VarError;

use super::*;

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
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "AGROFARM_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_base_url, "https://agrofarm-vd8i.onrender.com/api/");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.connect_timeout_secs, 10);
    assert_eq!(cfg.user_agent, "agrofarm/0.1 (marketplace-client)");
}

#[test]
fn base_url_gets_single_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("AGROFARM_API_BASE_URL", "http://localhost:4000/api//");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:4000/api/");
}

#[test]
fn base_url_surrounding_whitespace_is_trimmed() {
    let mut map = HashMap::new();
    map.insert("AGROFARM_API_BASE_URL", "  https://agrofarm.example/api  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://agrofarm.example/api/");
}

#[test]
fn blank_base_url_is_rejected() {
    let mut map = HashMap::new();
    map.insert("AGROFARM_API_BASE_URL", " / ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGROFARM_API_BASE_URL"),
        "expected InvalidEnvVar(AGROFARM_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("AGROFARM_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("AGROFARM_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGROFARM_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(AGROFARM_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("AGROFARM_REQUEST_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn connect_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("AGROFARM_CONNECT_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGROFARM_CONNECT_TIMEOUT_SECS"),
        "expected InvalidEnvVar(AGROFARM_CONNECT_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn user_agent_and_log_level_overrides() {
    let mut map = HashMap::new();
    map.insert("AGROFARM_USER_AGENT", "custom-agent/2.0");
    map.insert("AGROFARM_LOG_LEVEL", "debug");
    map.insert("AGROFARM_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.env, Environment::Production);
}
