use medium_wave::config::Config;
use tempfile::TempDir;

#[test]
fn test_config_lifecycle() {
    // Create a temporary directory for test config
    let temp_dir = TempDir::new().unwrap();

    // Override the config path for testing
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    // Test that config doesn't exist initially and loading gives defaults
    assert!(!Config::exists().unwrap());
    let defaults = Config::load().unwrap();
    assert_eq!(defaults.poll_interval_ms, 100);
    assert!(defaults.ffmpeg_path.is_none());

    // Create and save a config
    let config = Config::new();
    config.save().unwrap();
    assert!(Config::exists().unwrap());

    // Test config mutation
    let mut config = Config::load().unwrap();
    config.set_value("ffplay_path", "/opt/ffmpeg/bin/ffplay").unwrap();
    config.set_value("quit_key", "x").unwrap();
    config.save().unwrap();

    // Verify mutations persisted
    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.ffplay_path.as_deref(), Some("/opt/ffmpeg/bin/ffplay"));
    assert_eq!(reloaded.quit_key, 'x');
    assert_eq!(reloaded.next_key, 'n');

    // Invalid values are rejected and never saved
    let mut config = Config::load().unwrap();
    assert!(config.set_value("invalid_key", "value").is_err());
    assert!(config.set_value("poll_interval_ms", "0").is_err());
}
