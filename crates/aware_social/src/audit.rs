//! Audit log reader.

use crate::conversions::{to_audit_action, to_guild_id};
use crate::error::platform;
use async_trait::async_trait;
use aware_core::{AuditAction, GuildId, UserId};
use aware_error::AwareResult;
use aware_interface::AuditTrail;
use serenity::http::Http;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Reads the most recent audit log entry through the Discord REST API.
#[derive(Clone)]
pub struct SerenityAuditTrail {
    http: Arc<Http>,
}

impl SerenityAuditTrail {
    /// Audit trail over an HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuditTrail for SerenityAuditTrail {
    #[instrument(skip(self), fields(guild = %guild, action = %action))]
    async fn latest_actor(
        &self,
        guild: GuildId,
        action: AuditAction,
    ) -> AwareResult<Option<UserId>> {
        let logs = self
            .http
            .get_audit_logs(
                to_guild_id(guild),
                Some(to_audit_action(action)),
                None,
                None,
                Some(1),
            )
            .await
            .map_err(platform)?;

        let actor = logs
            .entries
            .first()
            .map(|entry| UserId::new(entry.user_id.get()));
        debug!(found = actor.is_some(), "Audit log queried");
        Ok(actor)
    }
}
