use std::collections::HashMap;
use std::env::VarError;

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
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.state_path.to_string_lossy(),
        "./data/trendly-state.json"
    );
    assert_eq!(
        cfg.watchlist_path.to_string_lossy(),
        "./config/competitors.yaml"
    );
    assert!(cfg.rapidapi_key.is_none());
    assert_eq!(cfg.rapidapi_host, "instagram-scraper-api2.p.rapidapi.com");
    assert!(cfg.openai_api_key.is_none());
    assert_eq!(cfg.openai_model, "gpt-4-turbo-preview");
    assert_eq!(cfg.openai_base_url, "https://api.openai.com");
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "trendly/0.1 (competitor-analysis)");
    assert_eq!(cfg.posts_per_profile, 12);
    assert_eq!(cfg.sync_concurrency, 2);
    assert!(!cfg.instagram_configured());
    assert!(!cfg.ai_configured());
}

#[test]
fn build_app_config_reads_api_keys() {
    let mut map = HashMap::new();
    map.insert("RAPIDAPI_KEY", "rapid-key");
    map.insert("OPENAI_API_KEY", "sk-test");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rapidapi_key.as_deref(), Some("rapid-key"));
    assert_eq!(cfg.openai_api_key.as_deref(), Some("sk-test"));
    assert!(cfg.instagram_configured());
    assert!(cfg.ai_configured());
}

#[test]
fn build_app_config_treats_blank_keys_as_unset() {
    let mut map = HashMap::new();
    map.insert("RAPIDAPI_KEY", "   ");
    map.insert("OPENAI_API_KEY", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.rapidapi_key.is_none());
    assert!(cfg.openai_api_key.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("TRENDLY_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDLY_BIND_ADDR"),
        "expected InvalidEnvVar(TRENDLY_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_http_timeout_override() {
    let mut map = HashMap::new();
    map.insert("TRENDLY_HTTP_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_timeout_secs, 5);
}

#[test]
fn build_app_config_http_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("TRENDLY_HTTP_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDLY_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TRENDLY_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_posts_per_profile_override() {
    let mut map = HashMap::new();
    map.insert("TRENDLY_POSTS_PER_PROFILE", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.posts_per_profile, 30);
}

#[test]
fn build_app_config_sync_concurrency_invalid() {
    let mut map = HashMap::new();
    map.insert("TRENDLY_SYNC_CONCURRENCY", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDLY_SYNC_CONCURRENCY"),
        "expected InvalidEnvVar(TRENDLY_SYNC_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("RAPIDAPI_KEY", "rapid-secret");
    map.insert("OPENAI_API_KEY", "sk-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("rapid-secret"));
    assert!(!rendered.contains("sk-secret"));
    assert!(rendered.contains("[redacted]"));
}
