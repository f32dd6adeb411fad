//! Runtime configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (include_str! from aware.toml)
//! 2. `~/.config/aware/aware.toml`
//! 3. `./aware.toml`
//! 4. `AWARE__<SECTION>__<KEY>` environment variables

use aware_error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../aware.toml");

/// Top-level configuration.
///
/// # Example
///
/// ```no_run
/// use aware_core::AwareConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AwareConfig::load()?;
/// println!("database: {}", config.database.url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AwareConfig {
    /// Policy and exemption storage.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Log delivery.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Rate accountant housekeeping.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Punishment audit reasons.
    #[serde(default)]
    pub punishment: PunishmentConfig,
    /// Embed footers.
    #[serde(default)]
    pub embeds: EmbedConfig,
    /// Bot join/leave guild log.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path (or `:memory:`).
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "main.db".to_string(),
        }
    }
}

/// Delivery settings for detection and moderation logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Attempts per destination, first try included.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub retry_delay_ms: u64,
    /// Display name used for webhook posts.
    pub username: String,
}

impl NotificationConfig {
    /// Pause between attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 2000,
            username: "Mod Logs".to_string(),
        }
    }
}

/// Rate accountant settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Seconds between sweeps of stale action windows.
    pub sweep_interval_secs: u64,
}

impl RateLimitConfig {
    /// Sweep period.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 300,
        }
    }
}

/// Punishment settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunishmentConfig {
    /// Prepended to audit-log reasons as `"<prefix> | <reason>"`.
    pub reason_prefix: String,
}

impl PunishmentConfig {
    /// Formats an audit-log reason.
    pub fn audit_reason(&self, reason: &str) -> String {
        format!("{} | {}", self.reason_prefix, reason)
    }
}

impl Default for PunishmentConfig {
    fn default() -> Self {
        Self {
            reason_prefix: "Server Secured by Aware".to_string(),
        }
    }
}

/// Embed footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Footer of detection logs.
    pub detection_footer: String,
    /// Footer of moderation logs.
    pub moderation_footer: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            detection_footer: "Server Secured by Aware".to_string(),
            moderation_footer: "Aware Moderation".to_string(),
        }
    }
}

/// Bot-wide log of guilds the bot joins and leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Initial state of the switch; it can be flipped at runtime.
    pub enabled: bool,
    /// Webhook URL receiving the entries. Nothing is sent when unset.
    pub webhook: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webhook: None,
        }
    }
}

impl AwareConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/aware/aware.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("aware").required(false))
            .add_source(Environment::with_prefix("AWARE").separator("__"));

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }
}
