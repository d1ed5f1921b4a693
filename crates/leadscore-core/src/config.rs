use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var carries an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if an env var carries an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Decoupled from the actual environment so tests can drive it with a pure
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("LEADSCORE_LOG_LEVEL", "info");
    let rules_path = lookup("LEADSCORE_RULES_PATH").ok().map(PathBuf::from);

    let fuzzy_threshold = match lookup("LEADSCORE_FUZZY_THRESHOLD") {
        Ok(raw) => {
            let parsed = raw
                .parse::<f64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "LEADSCORE_FUZZY_THRESHOLD".to_string(),
                    reason: e.to_string(),
                })?;
            if !(parsed > 0.0 && parsed <= 1.0) {
                return Err(ConfigError::InvalidEnvVar {
                    var: "LEADSCORE_FUZZY_THRESHOLD".to_string(),
                    reason: format!("must be in (0.0, 1.0], got {parsed}"),
                });
            }
            Some(parsed)
        }
        Err(_) => None,
    };

    Ok(AppConfig {
        log_level,
        rules_path,
        fuzzy_threshold,
    })
}

#[cfg(test)]
pub(crate) fn build_app_config_for_test<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    build_app_config(lookup)
}
