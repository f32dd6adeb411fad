//! Webhook log delivery.

use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use async_trait::async_trait;
use aware_core::{LogEmbed, WebhookUrl};
use aware_error::{AwareResult, PlatformError};
use aware_interface::NotificationTransport;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct Footer<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Embed<'a> {
    title: &'a str,
    description: &'a str,
    color: u32,
    timestamp: String,
    footer: Footer<'a>,
}

/// Body of an "execute webhook" request.
#[derive(Debug, Serialize)]
pub(crate) struct WebhookPayload<'a> {
    username: &'a str,
    embeds: [Embed<'a>; 1],
}

impl<'a> WebhookPayload<'a> {
    pub(crate) fn new(username: &'a str, embed: &'a LogEmbed) -> Self {
        Self {
            username,
            embeds: [Embed {
                title: embed.title(),
                description: embed.description(),
                color: *embed.color(),
                timestamp: embed.timestamp().to_rfc3339(),
                footer: Footer {
                    text: embed.footer(),
                },
            }],
        }
    }
}

/// Posts embeds to Discord webhook URLs.
///
/// One attempt per call; retries belong to the dispatcher.
#[derive(Debug, Clone)]
pub struct WebhookTransport {
    client: Client,
    username: String,
}

impl WebhookTransport {
    /// Transport posting under `username`.
    pub fn new(username: impl Into<String>) -> DiscordResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            username: username.into(),
        })
    }

    async fn execute(&self, webhook: &WebhookUrl, embed: &LogEmbed) -> DiscordResult<()> {
        let response = self
            .client
            .post(webhook.url())
            .query(&[("wait", "true")])
            .json(&WebhookPayload::new(&self.username, embed))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(DiscordError::new(DiscordErrorKind::Rejected { status, message }));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationTransport for WebhookTransport {
    #[instrument(skip(self, destination, embed), fields(title = %embed.title()))]
    async fn send_embed(&self, destination: &str, embed: &LogEmbed) -> AwareResult<()> {
        let webhook = WebhookUrl::parse(destination)?;
        self.execute(&webhook, embed)
            .await
            .map_err(PlatformError::from)?;
        debug!(webhook_id = *webhook.id(), "Webhook executed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aware_core::UserId;

    #[test]
    fn test_payload_matches_discord_shape() {
        let embed = LogEmbed::detection(
            UserId::new(42),
            "Role Deletion",
            "Mass Role Deletion Detected",
            "Server Secured by Aware",
        );
        let body = serde_json::to_value(WebhookPayload::new("Mod Logs", &embed))
            .expect("payload serializes");

        assert_eq!(body["username"], "Mod Logs");
        let sent = &body["embeds"][0];
        assert_eq!(sent["title"], "Anti-Nuke Detection");
        assert_eq!(sent["color"], 0xff6b6b);
        assert_eq!(sent["footer"]["text"], "Server Secured by Aware");
        assert!(
            sent["description"]
                .as_str()
                .is_some_and(|d| d.starts_with("**User:** <@42>"))
        );
        assert!(sent["timestamp"].as_str().is_some_and(|t| t.contains('T')));
    }

    #[tokio::test]
    async fn test_malformed_destination_is_rejected_before_sending() {
        let transport = WebhookTransport::new("Mod Logs").expect("client builds");
        let embed = LogEmbed::punishment(UserId::new(1), "Mass Kick Detected", "ban", "Aware");

        let err = transport
            .send_embed("not a webhook", &embed)
            .await
            .expect_err("rejected");
        assert!(err.to_string().contains("Invalid destination"));
    }
}
