use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment, SearchConfig};
use crate::ConfigError;

/// Upper bound accepted for `PLACEMARK_SEARCH_LIMIT`.
const MAX_SEARCH_LIMIT: u32 = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars,
/// so a later [`load_search_config_from_env`] sees them too.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load crawler backend settings from environment variables already in the process.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_search_config_from_env() -> Result<SearchConfig, ConfigError> {
    build_search_config(|key| std::env::var(key))
}

fn or_default<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup(var).unwrap_or_else(|_| default.to_string())
}

fn parse_var<F, T>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    or_default(lookup, var, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    Ok(AppConfig {
        env: parse_environment(&or_default(&lookup, "PLACEMARK_ENV", "development"))?,
        log_level: or_default(&lookup, "PLACEMARK_LOG_LEVEL", "info"),
        output_dir: PathBuf::from(or_default(&lookup, "PLACEMARK_OUTPUT_DIR", "output")),
    })
}

fn build_search_config<F>(lookup: F) -> Result<SearchConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let api_url = or_default(&lookup, "PLACEMARK_SEARCH_API_URL", "http://localhost:8000");
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLACEMARK_SEARCH_API_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{api_url}\""),
        });
    }

    let limit: u32 = parse_var(&lookup, "PLACEMARK_SEARCH_LIMIT", "10")?;
    if limit == 0 || limit > MAX_SEARCH_LIMIT {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLACEMARK_SEARCH_LIMIT".to_string(),
            reason: format!("must be between 1 and {MAX_SEARCH_LIMIT}, got {limit}"),
        });
    }

    Ok(SearchConfig {
        api_url,
        limit,
        request_timeout_secs: parse_var(&lookup, "PLACEMARK_REQUEST_TIMEOUT_SECS", "120")?,
        user_agent: or_default(&lookup, "PLACEMARK_USER_AGENT", "placemark/0.1"),
        max_retries: parse_var(&lookup, "PLACEMARK_MAX_RETRIES", "2")?,
        retry_backoff_base_secs: parse_var(&lookup, "PLACEMARK_RETRY_BACKOFF_BASE_SECS", "3")?,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLACEMARK_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
