use crate::app_config::{AppConfig, Environment};
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
/// Pure over `lookup` so tests can drive it from a `HashMap`. Every variable
/// has a default; API keys are optional because both upstream integrations
/// degrade softly when unconfigured.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so a blank `.env` entry does not enable a client.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("TRENDLY_ENV", "development"));

    let bind_addr = parse("TRENDLY_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("TRENDLY_LOG_LEVEL", "info");
    let state_path = PathBuf::from(or_default(
        "TRENDLY_STATE_PATH",
        "./data/trendly-state.json",
    ));
    let watchlist_path = PathBuf::from(or_default(
        "TRENDLY_WATCHLIST_PATH",
        "./config/competitors.yaml",
    ));

    let rapidapi_key = optional("RAPIDAPI_KEY");
    let rapidapi_host = or_default("RAPIDAPI_HOST", "instagram-scraper-api2.p.rapidapi.com");

    let openai_api_key = optional("OPENAI_API_KEY");
    let openai_model = or_default("OPENAI_MODEL", "gpt-4-turbo-preview");
    let openai_base_url = or_default("OPENAI_BASE_URL", "https://api.openai.com");

    let http_timeout_secs = parse_u64("TRENDLY_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TRENDLY_USER_AGENT", "trendly/0.1 (competitor-analysis)");
    let posts_per_profile = parse_usize("TRENDLY_POSTS_PER_PROFILE", "12")?;
    let sync_concurrency = parse_usize("TRENDLY_SYNC_CONCURRENCY", "2")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        state_path,
        watchlist_path,
        rapidapi_key,
        rapidapi_host,
        openai_api_key,
        openai_model,
        openai_base_url,
        http_timeout_secs,
        user_agent,
        posts_per_profile,
        sync_concurrency,
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

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
