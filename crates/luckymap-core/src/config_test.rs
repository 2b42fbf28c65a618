use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

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
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LUCKYMAP_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.stores_path.is_none());
    assert!(cfg.kakao_map_api_key.is_none());
    assert_eq!(cfg.crawler_base_url, DEFAULT_CRAWLER_BASE_URL);
    assert_eq!(cfg.crawler_user_agent, DEFAULT_CRAWLER_USER_AGENT);
    assert_eq!(cfg.crawler_timeout_ms, 60_000);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("LUCKYMAP_ENV", "production");
    map.insert("LUCKYMAP_BIND_ADDR", "127.0.0.1:8080");
    map.insert("LUCKYMAP_STORES_PATH", "./config/stores.yaml");
    map.insert("KAKAO_MAP_API_KEY", "js-key");
    map.insert("LUCKYMAP_CRAWLER_BASE_URL", "http://localhost:9000/");
    map.insert("LUCKYMAP_CRAWLER_TIMEOUT_MS", "1500");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(
        cfg.stores_path,
        Some(PathBuf::from("./config/stores.yaml"))
    );
    assert_eq!(cfg.kakao_map_api_key.as_deref(), Some("js-key"));
    assert_eq!(cfg.crawler_base_url, "http://localhost:9000");
    assert_eq!(cfg.crawler_timeout_ms, 1500);
}

#[test]
fn blank_credential_counts_as_unset() {
    let mut map = HashMap::new();
    map.insert("KAKAO_MAP_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.kakao_map_api_key.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("LUCKYMAP_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LUCKYMAP_BIND_ADDR"),
        "expected InvalidEnvVar(LUCKYMAP_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    for raw in ["not-a-number", "0"] {
        let mut map = HashMap::new();
        map.insert("LUCKYMAP_CRAWLER_TIMEOUT_MS", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LUCKYMAP_CRAWLER_TIMEOUT_MS"),
            "expected InvalidEnvVar(LUCKYMAP_CRAWLER_TIMEOUT_MS) for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("LUCKYMAP_CRAWLER_BASE_URL", "ftp://dhlottery.co.kr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LUCKYMAP_CRAWLER_BASE_URL"
    ));
}

#[test]
fn debug_redacts_map_key() {
    let mut map = HashMap::new();
    map.insert("KAKAO_MAP_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("[redacted]"));
}
