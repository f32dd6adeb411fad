//! Kick, ban and role calls.

use crate::conversions::{to_guild_id, to_role_id, to_user_id};
use crate::error::platform;
use async_trait::async_trait;
use aware_core::{GuildId, RoleId, UserId};
use aware_error::AwareResult;
use aware_interface::ModerationActions;
use serenity::http::Http;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Moderation capability over the Discord REST API.
#[derive(Clone)]
pub struct SerenityModeration {
    http: Arc<Http>,
}

impl SerenityModeration {
    /// Moderation over an HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ModerationActions for SerenityModeration {
    #[instrument(skip(self, reason), fields(guild = %guild, user = %user))]
    async fn kick(&self, guild: GuildId, user: UserId, reason: &str) -> AwareResult<()> {
        self.http
            .kick_member(to_guild_id(guild), to_user_id(user), Some(reason))
            .await
            .map_err(platform)?;
        debug!("Member kicked");
        Ok(())
    }

    #[instrument(skip(self, reason), fields(guild = %guild, user = %user))]
    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> AwareResult<()> {
        self.http
            .ban_user(to_guild_id(guild), to_user_id(user), 0, Some(reason))
            .await
            .map_err(platform)?;
        debug!("Member banned");
        Ok(())
    }

    async fn member_roles(&self, guild: GuildId, user: UserId) -> AwareResult<Vec<RoleId>> {
        let member = self
            .http
            .get_member(to_guild_id(guild), to_user_id(user))
            .await
            .map_err(platform)?;
        Ok(member
            .roles
            .iter()
            .map(|role| RoleId::new(role.get()))
            .collect())
    }

    #[instrument(skip(self, reason), fields(guild = %guild, user = %user, role = %role))]
    async fn remove_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> AwareResult<()> {
        self.http
            .remove_member_role(
                to_guild_id(guild),
                to_user_id(user),
                to_role_id(role),
                Some(reason),
            )
            .await
            .map_err(platform)?;
        Ok(())
    }

    #[instrument(skip(self, reason), fields(guild = %guild, user = %user, role = %role))]
    async fn add_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> AwareResult<()> {
        self.http
            .add_member_role(
                to_guild_id(guild),
                to_user_id(user),
                to_role_id(role),
                Some(reason),
            )
            .await
            .map_err(platform)?;
        Ok(())
    }
}
