//! Discord bot client setup and lifecycle management.

use crate::{
    AntinukeHandler, DiscordError, DiscordErrorKind, DiscordResult, SerenityAuditTrail,
    SerenityModeration, WebhookTransport,
};
use aware_antinuke::{Capabilities, DetectionOrchestrator};
use aware_interface::{ExemptionStore, PolicyStore};
use serenity::Client;
use serenity::http::Http;
use std::sync::Arc;
use tracing::{info, instrument};

/// Capabilities backed by Discord: REST audit log and moderation, webhook logs.
///
/// # Errors
///
/// Fails when the webhook HTTP client cannot be built.
pub fn discord_capabilities(
    token: &str,
    webhook_username: &str,
    policies: Arc<dyn PolicyStore>,
    exemptions: Arc<dyn ExemptionStore>,
) -> DiscordResult<Capabilities> {
    let http = Arc::new(Http::new(token));
    Ok(Capabilities {
        audit: Arc::new(SerenityAuditTrail::new(Arc::clone(&http))),
        policies,
        exemptions,
        moderation: Arc::new(SerenityModeration::new(http)),
        transport: Arc::new(WebhookTransport::new(webhook_username)?),
    })
}

/// Gateway connection running the anti-nuke handler.
///
/// # Example
/// ```no_run
/// use aware_antinuke::DetectionOrchestrator;
/// use aware_social::AwareBot;
/// use std::sync::Arc;
///
/// async fn run(token: &str, orchestrator: Arc<DetectionOrchestrator>) -> Result<(), Box<dyn std::error::Error>> {
///     let mut bot = AwareBot::new(token, orchestrator).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct AwareBot {
    client: Client,
}

impl AwareBot {
    /// Builds the serenity client.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` if the client cannot be built, e.g. for a
    /// malformed token.
    pub async fn new(token: &str, orchestrator: Arc<DetectionOrchestrator>) -> DiscordResult<Self> {
        Self::with_handler(token, AntinukeHandler::new(orchestrator)).await
    }

    /// Builds the serenity client around a configured handler.
    ///
    /// # Errors
    ///
    /// Same as [`AwareBot::new`].
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn with_handler(token: &str, handler: AntinukeHandler) -> DiscordResult<Self> {
        let intents = AntinukeHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// Runs until the gateway closes or Ctrl+C is pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> DiscordResult<()> {
        let shard_manager = Arc::clone(&self.client.shard_manager);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested, closing shards");
                shard_manager.shutdown_all().await;
            }
        });

        info!("Starting anti-nuke gateway connection");
        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }
}
