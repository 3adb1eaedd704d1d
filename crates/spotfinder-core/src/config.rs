use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_OPERATING_CITY: &str = "Chicago, Illinois";
pub const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com/";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let serpapi_api_key = require("SERPAPI_KEY")?;
    let geocode_api_key = require("GOOGLE_GEOCODE_KEY")?;

    let env = parse_environment(&or_default("SPOTFINDER_ENV", "development"))?;
    let log_level = or_default("SPOTFINDER_LOG_LEVEL", "info");
    let operating_city = or_default("SPOTFINDER_OPERATING_CITY", DEFAULT_OPERATING_CITY);
    let serpapi_base_url = or_default("SPOTFINDER_SERPAPI_BASE_URL", DEFAULT_SERPAPI_BASE_URL);
    let geocode_base_url = or_default("SPOTFINDER_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);

    let request_timeout_secs = parse_u64("SPOTFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "SPOTFINDER_USER_AGENT",
        "spotfinder/0.1 (activity-locations)",
    );
    let max_concurrent_lookups = parse_usize("SPOTFINDER_MAX_CONCURRENT_LOOKUPS", "8")?;
    if max_concurrent_lookups == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SPOTFINDER_MAX_CONCURRENT_LOOKUPS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let max_retries = parse_u32("SPOTFINDER_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("SPOTFINDER_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        env,
        log_level,
        serpapi_api_key,
        geocode_api_key,
        operating_city,
        serpapi_base_url,
        geocode_base_url,
        request_timeout_secs,
        user_agent,
        max_concurrent_lookups,
        max_retries,
        retry_backoff_base_ms,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SPOTFINDER_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
