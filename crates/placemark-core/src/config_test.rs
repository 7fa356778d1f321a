use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

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
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_is_error() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PLACEMARK_ENV"));
}

#[test]
fn build_app_config_uses_defaults_on_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.output_dir, PathBuf::from("output"));
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_ENV", "production");
    map.insert("PLACEMARK_LOG_LEVEL", "placemark=debug");
    map.insert("PLACEMARK_OUTPUT_DIR", "/tmp/exports");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "placemark=debug");
    assert_eq!(cfg.output_dir, PathBuf::from("/tmp/exports"));
}

#[test]
fn build_app_config_ignores_invalid_search_settings() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_SEARCH_API_URL", "localhost:8000");
    map.insert("PLACEMARK_SEARCH_LIMIT", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_ok());
}

#[test]
fn build_app_config_rejects_unknown_env() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_ENV", "staging");
    assert!(matches!(
        build_app_config(lookup_from_map(&map)),
        Err(ConfigError::InvalidEnvVar { .. })
    ));
}

#[test]
fn build_search_config_uses_defaults_on_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_search_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_url, "http://localhost:8000");
    assert_eq!(cfg.limit, 10);
    assert_eq!(cfg.request_timeout_secs, 120);
    assert_eq!(cfg.user_agent, "placemark/0.1");
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_secs, 3);
}

#[test]
fn build_search_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_SEARCH_API_URL", "https://crawler.internal:8443");
    map.insert("PLACEMARK_SEARCH_LIMIT", "20");
    map.insert("PLACEMARK_MAX_RETRIES", "0");
    map.insert("PLACEMARK_RETRY_BACKOFF_BASE_SECS", "1");
    let cfg = build_search_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_url, "https://crawler.internal:8443");
    assert_eq!(cfg.limit, 20);
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
}

#[test]
fn build_search_config_rejects_non_http_url() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_SEARCH_API_URL", "localhost:8000");
    let result = build_search_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEMARK_SEARCH_API_URL"),
        "expected InvalidEnvVar(PLACEMARK_SEARCH_API_URL), got: {result:?}"
    );
}

#[test]
fn build_search_config_rejects_zero_limit() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_SEARCH_LIMIT", "0");
    let result = build_search_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEMARK_SEARCH_LIMIT"),
        "expected InvalidEnvVar(PLACEMARK_SEARCH_LIMIT), got: {result:?}"
    );
}

#[test]
fn build_search_config_rejects_limit_above_cap() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_SEARCH_LIMIT", "101");
    let result = build_search_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn build_search_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_search_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEMARK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PLACEMARK_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_search_config_rejects_negative_retries() {
    let mut map = HashMap::new();
    map.insert("PLACEMARK_MAX_RETRIES", "-1");
    let result = build_search_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACEMARK_MAX_RETRIES"),
        "expected InvalidEnvVar(PLACEMARK_MAX_RETRIES), got: {result:?}"
    );
}
