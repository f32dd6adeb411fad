//! Webhook destination references.

use aware_error::{PlatformError, PlatformErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static WEBHOOK_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https://(?:(?:canary|ptb)\.)?discord(?:app)?\.com/api(?:/v\d+)?/webhooks/(\d+)/([A-Za-z0-9_\-]+)/?$",
    )
    .expect("Valid webhook URL regex")
});

/// A parsed webhook URL.
///
/// # Examples
///
/// ```
/// use aware_core::WebhookUrl;
///
/// let hook = WebhookUrl::parse("https://discord.com/api/webhooks/123/abc-DEF_9").unwrap();
/// assert_eq!(*hook.id(), 123);
/// assert_eq!(hook.token(), "abc-DEF_9");
/// assert!(WebhookUrl::parse("https://example.com/hook").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct WebhookUrl {
    /// Webhook snowflake.
    id: u64,
    /// Execution token.
    token: String,
}

impl WebhookUrl {
    /// Extracts id and token from `…/api/webhooks/<id>/<token>`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDestination` if the URL is not a webhook URL.
    #[track_caller]
    pub fn parse(url: &str) -> Result<Self, PlatformError> {
        let invalid = || PlatformError::new(PlatformErrorKind::InvalidDestination(url.to_string()));
        let captures = WEBHOOK_URL.captures(url.trim()).ok_or_else(invalid)?;
        let id = captures[1].parse::<u64>().map_err(|_| invalid())?;
        Ok(Self {
            id,
            token: captures[2].to_string(),
        })
    }

    /// Canonical execution URL.
    pub fn url(&self) -> String {
        format!("https://discord.com/api/webhooks/{}/{}", self.id, self.token)
    }
}
