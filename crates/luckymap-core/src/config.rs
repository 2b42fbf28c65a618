use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_CRAWLER_BASE_URL: &str = "https://dhlottery.co.kr";
pub const DEFAULT_CRAWLER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_CRAWLER_TIMEOUT_MS: u64 = 60_000;

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
/// Every variable is optional. Blank values count as unset for the optional
/// path and credential.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("LUCKYMAP_ENV", "development"))?;

    let bind_addr = or_default("LUCKYMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("LUCKYMAP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("LUCKYMAP_LOG_LEVEL", "info");
    let stores_path = optional("LUCKYMAP_STORES_PATH").map(PathBuf::from);
    let kakao_map_api_key = optional("KAKAO_MAP_API_KEY");

    let crawler_base_url = or_default("LUCKYMAP_CRAWLER_BASE_URL", DEFAULT_CRAWLER_BASE_URL);
    if !(crawler_base_url.starts_with("http://") || crawler_base_url.starts_with("https://")) {
        return Err(invalid(
            "LUCKYMAP_CRAWLER_BASE_URL",
            "must start with http:// or https://".to_string(),
        ));
    }
    let crawler_user_agent = or_default("LUCKYMAP_CRAWLER_USER_AGENT", DEFAULT_CRAWLER_USER_AGENT);
    let crawler_timeout_ms = or_default(
        "LUCKYMAP_CRAWLER_TIMEOUT_MS",
        &DEFAULT_CRAWLER_TIMEOUT_MS.to_string(),
    )
    .parse::<u64>()
    .map_err(|e| invalid("LUCKYMAP_CRAWLER_TIMEOUT_MS", e.to_string()))?;
    if crawler_timeout_ms == 0 {
        return Err(invalid(
            "LUCKYMAP_CRAWLER_TIMEOUT_MS",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        stores_path,
        kakao_map_api_key,
        crawler_base_url: crawler_base_url.trim_end_matches('/').to_string(),
        crawler_user_agent,
        crawler_timeout_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LUCKYMAP_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
