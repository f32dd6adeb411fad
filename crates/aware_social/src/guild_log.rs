//! Bot-wide log of guilds joined and left.

use aware_core::{GuildSummary, LogEmbed, LoggingConfig};
use aware_interface::NotificationTransport;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument, warn};

/// Posts "Bot Joined New Guild" and "Bot Left Guild" entries.
///
/// Delivery is a single attempt; failures are logged and dropped.
pub struct GuildLogger {
    transport: Arc<dyn NotificationTransport>,
    destination: String,
    enabled: AtomicBool,
}

impl GuildLogger {
    /// Logger posting to `destination`, initially switched on or off.
    pub fn new(
        transport: Arc<dyn NotificationTransport>,
        destination: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            transport,
            destination: destination.into(),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Logger for the `[logging]` section, or `None` without a webhook.
    pub fn from_config(
        transport: Arc<dyn NotificationTransport>,
        config: &LoggingConfig,
    ) -> Option<Self> {
        config
            .webhook
            .as_ref()
            .map(|webhook| Self::new(transport, webhook.clone(), config.enabled))
    }

    /// Switch logging on.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Switch logging off.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Current state of the switch.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Reports a guild the bot joined. `true` when an entry was delivered.
    #[instrument(skip(self, guild), fields(guild = %guild.id))]
    pub async fn joined(&self, guild: &GuildSummary) -> bool {
        self.post(LogEmbed::guild_joined(guild)).await
    }

    /// Reports a guild the bot left. `true` when an entry was delivered.
    #[instrument(skip(self, guild), fields(guild = %guild.id))]
    pub async fn left(&self, guild: &GuildSummary) -> bool {
        self.post(LogEmbed::guild_left(guild)).await
    }

    async fn post(&self, embed: LogEmbed) -> bool {
        if !self.is_enabled() {
            debug!("Guild log disabled");
            return false;
        }
        match self.transport.send_embed(&self.destination, &embed).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, title = %embed.title(), "Failed to send guild log");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use aware_core::{GuildId, UserId};
    use aware_error::{AwareResult, PlatformError, PlatformErrorKind};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct SentEmbeds {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl NotificationTransport for SentEmbeds {
        async fn send_embed(&self, destination: &str, embed: &LogEmbed) -> AwareResult<()> {
            if self.fail {
                return Err(PlatformError::new(PlatformErrorKind::Unavailable("webhook".into())).into());
            }
            self.sent
                .lock()
                .await
                .push((destination.to_string(), embed.title().clone()));
            Ok(())
        }
    }

    fn lounge() -> GuildSummary {
        GuildSummary {
            id: GuildId::new(10),
            name: Some("Lounge".to_string()),
            member_count: Some(3),
            owner: Some(UserId::new(7)),
        }
    }

    #[tokio::test]
    async fn test_join_and_leave_are_posted() {
        let transport = Arc::new(SentEmbeds::default());
        let logger = GuildLogger::new(transport.clone(), "hook", true);

        assert!(logger.joined(&lounge()).await);
        assert!(logger.left(&lounge()).await);

        let sent = transport.sent.lock().await;
        assert_eq!(
            *sent,
            vec![
                ("hook".to_string(), "Bot Joined New Guild".to_string()),
                ("hook".to_string(), "Bot Left Guild".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_switch_suppresses_entries() {
        let transport = Arc::new(SentEmbeds::default());
        let logger = GuildLogger::new(transport.clone(), "hook", true);

        logger.disable();
        assert!(!logger.joined(&lounge()).await);
        assert!(transport.sent.lock().await.is_empty());

        logger.enable();
        assert!(logger.joined(&lounge()).await);
        assert_eq!(transport.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let transport = Arc::new(SentEmbeds {
            fail: true,
            ..SentEmbeds::default()
        });
        let logger = GuildLogger::new(transport, "hook", true);
        assert!(!logger.left(&lounge()).await);
    }

    #[test]
    fn test_from_config_requires_webhook() {
        let transport: Arc<dyn NotificationTransport> = Arc::new(SentEmbeds::default());
        assert!(GuildLogger::from_config(transport.clone(), &LoggingConfig::default()).is_none());

        let config = LoggingConfig {
            enabled: false,
            webhook: Some("hook".to_string()),
        };
        let logger = GuildLogger::from_config(transport, &config).expect("webhook set");
        assert!(!logger.is_enabled());
    }
}
