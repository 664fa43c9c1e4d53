//! 配置加载测试

use std::time::Duration;

use crate::internal::config::structs::config_error::ConfigError;
use crate::internal::config::structs::sync_config::SyncConfig;
use crate::internal::config::structs::sync_options::{SyncOptions, DEFAULT_PARTIAL_SUFFIX};

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn required() -> Vec<(String, String)> {
    vars(&[
        ("PORTAL_MIRROR_PORTAL_URL", "https://portal.test/v1"),
        ("PORTAL_MIRROR_ROOT_PATH", "/tmp/mirror"),
        ("PORTAL_MIRROR_USERNAME", "e0123456"),
        ("PORTAL_MIRROR_PASSWORD", "secret"),
    ])
}

#[test]
fn defaults_apply() {
    let config = SyncConfig::from_vars(required()).unwrap();
    let options = config.to_options();

    assert_eq!(options.settle_delay, Duration::from_millis(1000));
    assert_eq!(options.poll_interval, Duration::from_millis(1000));
    assert_eq!(options.download_timeout, Duration::from_secs(600));
    assert_eq!(options.max_depth, 32);
    assert_eq!(options.branch_workers, 1);
    assert_eq!(options.listing_container_id, "mainTable");
    assert_eq!(options.partial_suffix, DEFAULT_PARTIAL_SUFFIX);
}

#[test]
fn overrides_and_foreign_keys() {
    let mut input = required();
    input.extend(vars(&[
        ("PORTAL_MIRROR_DOWNLOAD_TIMEOUT_SECS", " 30 "),
        ("PORTAL_MIRROR_BRANCH_WORKERS", "3"),
        ("PORTAL_MIRROR_PARTIAL_SUFFIX", ".part"),
        ("HOME", "/root"),
    ]));

    let config = SyncConfig::from_vars(input).unwrap();
    let options = config.to_options();

    assert_eq!(options.download_timeout, Duration::from_secs(30));
    assert_eq!(options.branch_workers, 3);
    assert!(options.is_partial("a.pdf.part"));
    assert!(!options.is_partial("a.pdf"));
}

#[test]
fn missing_required_key() {
    let input: Vec<_> = required()
        .into_iter()
        .filter(|(k, _)| k != "PORTAL_MIRROR_PASSWORD")
        .collect();

    match SyncConfig::from_vars(input) {
        Err(ConfigError::Missing(key)) => assert_eq!(key, "PORTAL_MIRROR_PASSWORD"),
        other => panic!("应当缺少密码: {other:?}"),
    }
}

#[test]
fn invalid_numbers_are_rejected() {
    let mut input = required();
    input.push(("PORTAL_MIRROR_MAX_DEPTH".to_string(), "deep".to_string()));
    assert!(SyncConfig::from_vars(input).is_err());

    let mut input = required();
    input.push(("PORTAL_MIRROR_BRANCH_WORKERS".to_string(), "0".to_string()));
    assert!(matches!(
        SyncConfig::from_vars(input),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn debug_hides_password() {
    let config = SyncConfig::from_vars(required()).unwrap();
    let text = format!("{config:?}");
    assert!(!text.contains("secret"));
    assert!(text.contains("e0123456"));
}

#[test]
fn load_reads_env_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("mirror.env");
    std::fs::write(
        &file,
        "PORTAL_MIRROR_PORTAL_URL=https://portal.test/v1\n\
         PORTAL_MIRROR_ROOT_PATH=/tmp/mirror\n\
         PORTAL_MIRROR_USERNAME=e0123456\n\
         PORTAL_MIRROR_PASSWORD=secret\n\
         PORTAL_MIRROR_MAX_DEPTH=4\n",
    )
    .unwrap();

    let config = SyncConfig::load(Some(&file)).unwrap();
    assert_eq!(config.max_depth, 4);

    let credentials = config.credentials().unwrap();
    assert_eq!(credentials.base_url.as_str(), "https://portal.test/v1/");
}

#[test]
fn load_missing_explicit_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(matches!(
        SyncConfig::load(Some(&dir.path().join("absent.env"))),
        Err(ConfigError::ReadFile(_))
    ));
}

#[test]
fn option_defaults_match_config_defaults() {
    let from_config = SyncConfig::from_vars(required()).unwrap().to_options();
    let default = SyncOptions::default();
    assert_eq!(from_config.download_timeout, default.download_timeout);
    assert_eq!(from_config.max_depth, default.max_depth);
    assert_eq!(from_config.partial_suffix, default.partial_suffix);
}
