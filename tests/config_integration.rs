//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use multiwin::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("MW_SPRITE__SPEED", "250");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.sprite.speed, 250.0);
    std::env::remove_var("MW_SPRITE__SPEED");
}

#[test]
#[serial]
fn test_env_override_log_level() {
    std::env::set_var("MW_DEBUG__LOG_LEVEL", "trace");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.debug.log_level, "trace");
    std::env::remove_var("MW_DEBUG__LOG_LEVEL");
}

#[test]
#[serial]
fn test_default_file_loading() {
    // Remove env vars to test file-based config
    std::env::remove_var("MW_SPRITE__SPEED");
    std::env::remove_var("MW_DEBUG__LOG_LEVEL");

    let cwd = std::env::current_dir().unwrap();
    println!("Current dir: {:?}", cwd);
    println!(
        "config/default.toml exists: {}",
        cwd.join("config/default.toml").exists()
    );

    let config = AppConfig::load().unwrap();
    // The checked-in default config opens the classic pair of windows
    assert_eq!(config.windows.len(), 2);
    assert!(config.windows[0].title.contains("window 1"));
}

#[test]
#[serial]
fn test_missing_config_dir_falls_back_to_defaults() {
    let config = AppConfig::load_from("no/such/dir").unwrap();
    assert_eq!(config.windows.len(), AppConfig::default().windows.len());
}
