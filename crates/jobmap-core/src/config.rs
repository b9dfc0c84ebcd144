use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

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
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_flag = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_bool(&raw).ok_or_else(|| invalid(var, format!("expected a boolean, got \"{raw}\"")))
    };

    let env = parse_environment(&or_default("JOBMAP_ENV", "development"));
    let log_level = or_default("JOBMAP_LOG_LEVEL", "info");
    let offline = parse_flag("JOBMAP_OFFLINE", "false")?;

    let geocode_api_key = lookup("JOBMAP_GEOCODE_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    if geocode_api_key.is_none() && !offline {
        return Err(ConfigError::MissingEnvVar(
            "JOBMAP_GEOCODE_API_KEY".to_string(),
        ));
    }

    let geocode_base_url = or_default("JOBMAP_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);
    let geocode_timeout_secs = parse_u64("JOBMAP_GEOCODE_TIMEOUT_SECS", "10")?;
    let geocode_max_retries = parse_u32("JOBMAP_GEOCODE_MAX_RETRIES", "2")?;
    let geocode_backoff_base_ms = parse_u64("JOBMAP_GEOCODE_BACKOFF_BASE_MS", "500")?;
    let geocode_max_concurrent = parse_usize("JOBMAP_GEOCODE_MAX_CONCURRENT", "8")?;
    if geocode_max_concurrent == 0 {
        return Err(invalid(
            "JOBMAP_GEOCODE_MAX_CONCURRENT",
            "must be at least 1".to_string(),
        ));
    }

    let cache_dir = PathBuf::from(or_default("JOBMAP_CACHE_DIR", "./.jobmap"));
    let cache_persist = parse_flag("JOBMAP_CACHE_PERSIST", "true")?;
    let catalog_path = lookup("JOBMAP_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        geocode_api_key,
        geocode_base_url,
        geocode_timeout_secs,
        geocode_max_retries,
        geocode_backoff_base_ms,
        geocode_max_concurrent,
        cache_dir,
        cache_persist,
        catalog_path,
        offline,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
