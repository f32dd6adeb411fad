//! Tests for configuration loading.

use aware_core::{AwareConfig, NotificationConfig};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_bundled_defaults_match_struct_defaults() {
    let file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    let config = AwareConfig::from_file(file.path()).expect("empty override loads");
    assert_eq!(config, AwareConfig::default());
}

#[test]
fn test_file_overrides_bundled_values() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[notifications]\nmax_attempts = 5\nretry_delay_ms = 250\nusername = \"Audit\"\n\n[punishment]\nreason_prefix = \"Guarded\""
    )
    .expect("write config");

    let config = AwareConfig::from_file(file.path()).expect("config loads");
    assert_eq!(config.notifications.max_attempts, 5);
    assert_eq!(config.notifications.retry_delay(), Duration::from_millis(250));
    assert_eq!(config.punishment.audit_reason("Mass Ban Detected"), "Guarded | Mass Ban Detected");
    assert_eq!(config.embeds.moderation_footer, "Aware Moderation");
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[notifications\nmax_attempts = ").expect("write config");

    let err = AwareConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to read configuration"));
}

#[test]
fn test_notification_defaults() {
    let defaults = NotificationConfig::default();
    assert_eq!(defaults.max_attempts, 3);
    assert_eq!(defaults.retry_delay(), Duration::from_secs(2));
    assert_eq!(defaults.username, "Mod Logs");
}

#[test]
fn test_guild_log_section() {
    assert!(AwareConfig::default().logging.enabled);
    assert!(AwareConfig::default().logging.webhook.is_none());

    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[logging]\nenabled = false\nwebhook = \"https://discord.com/api/webhooks/1/t\""
    )
    .expect("write config");

    let config = AwareConfig::from_file(file.path()).expect("config loads");
    assert!(!config.logging.enabled);
    assert_eq!(
        config.logging.webhook.as_deref(),
        Some("https://discord.com/api/webhooks/1/t")
    );
}
