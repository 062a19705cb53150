use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_API_BASE_URL: &str = "https://agrofarm-vd8i.onrender.com/api/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
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

    let env = parse_environment(&or_default("AGROFARM_ENV", "development"))?;
    let api_base_url =
        normalize_base_url(&or_default("AGROFARM_API_BASE_URL", DEFAULT_API_BASE_URL))?;
    let log_level = or_default("AGROFARM_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("AGROFARM_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "AGROFARM_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let connect_timeout_secs = parse_u64("AGROFARM_CONNECT_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("AGROFARM_USER_AGENT", "agrofarm/0.1 (marketplace-client)");

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        request_timeout_secs,
        connect_timeout_secs,
        user_agent,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AGROFARM_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

/// Trims the value and gives it exactly one trailing slash so relative
/// endpoint paths join underneath it. Scheme and host are checked when the
/// HTTP client is built.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "AGROFARM_API_BASE_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(format!("{trimmed}/"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
