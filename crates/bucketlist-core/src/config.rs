use crate::app_config::AppConfig;
use crate::location::{Coordinate, IdentityPolicy};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| invalid(var, e.to_string())),
            _ => Ok(None),
        }
    };

    let log_level = or_default("BUCKETLIST_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("BUCKETLIST_DATA_DIR", "./data"));

    let latitude = parse_f64("BUCKETLIST_DEFAULT_LATITUDE", "50")?;
    let longitude = parse_f64("BUCKETLIST_DEFAULT_LONGITUDE", "0")?;
    let default_center = Coordinate::new(latitude, longitude)
        .map_err(|e| invalid("BUCKETLIST_DEFAULT_LATITUDE/LONGITUDE", e.to_string()))?;

    let wiki_base_url = or_default(
        "BUCKETLIST_WIKI_BASE_URL",
        "https://en.wikipedia.org/w/api.php",
    );
    let wiki_timeout_secs = parse_optional_u64("BUCKETLIST_WIKI_TIMEOUT_SECS")?;
    let user_agent = or_default("BUCKETLIST_USER_AGENT", "bucketlist/0.1 (nearby-places)");

    let edit_identity = or_default("BUCKETLIST_EDIT_IDENTITY", "stable")
        .parse::<IdentityPolicy>()
        .map_err(|e| invalid("BUCKETLIST_EDIT_IDENTITY", e.to_string()))?;

    let passcode = lookup("BUCKETLIST_PASSCODE")
        .ok()
        .filter(|p| !p.is_empty());

    Ok(AppConfig {
        log_level,
        data_dir,
        default_center,
        wiki_base_url,
        wiki_timeout_secs,
        user_agent,
        edit_identity,
        passcode,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
