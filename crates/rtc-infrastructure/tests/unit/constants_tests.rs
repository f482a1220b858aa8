//! Tests for infrastructure constants
#![allow(clippy::assertions_on_constants)]

use rtc_infrastructure::constants::*;

#[test]
fn test_env_override_names_share_prefix() {
    assert!(LOG_ENV_VAR.starts_with(CONFIG_ENV_PREFIX));
    assert_eq!(CONFIG_ENV_SEPARATOR, "__");
}

#[test]
fn test_config_file_lives_in_config_dir_name() {
    assert!(DEFAULT_CONFIG_FILENAME.ends_with(".toml"));
    assert!(DEFAULT_CONFIG_FILENAME.starts_with(DEFAULT_CONFIG_DIR));
}

#[test]
fn test_default_redis_endpoint() {
    assert!(!DEFAULT_REDIS_HOST.is_empty());
    assert_ne!(DEFAULT_REDIS_PORT, 0);
}
