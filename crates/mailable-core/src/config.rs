use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DEFAULT_VALIDATION_BASE_URL: &str = "https://addressvalidation.googleapis.com/v1:validateAddress";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let google_api_key = lookup("GOOGLE_MAPS_API_KEY").ok();
    let log_level = or_default("MAILABLE_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("MAILABLE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MAILABLE_USER_AGENT", "mailable/0.1 (address-verification)");
    let inter_request_delay_ms = parse_u64("MAILABLE_INTER_REQUEST_DELAY_MS", "600")?;
    let geocode_base_url = or_default("MAILABLE_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);
    let validation_base_url = or_default("MAILABLE_VALIDATION_BASE_URL", DEFAULT_VALIDATION_BASE_URL);

    Ok(AppConfig {
        google_api_key,
        log_level,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        geocode_base_url,
        validation_base_url,
    })
}
