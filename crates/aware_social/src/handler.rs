//! Serenity event handler feeding the detection pipeline.

use crate::GuildLogger;
use crate::conversions::{from_guild_id, guild_summary};
use aware_antinuke::{DetectionOrchestrator, DetectionOutcome};
use aware_core::{AdminEvent, EventKind, GuildSummary};
use serenity::all::{
    ChannelId, Guild, GuildChannel, GuildId, Member, Message, PartialGuild, Ready, Role, RoleId,
    UnavailableGuild, User,
};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns gateway events into [`AdminEvent`]s for the orchestrator.
///
/// Serenity dispatches every event on its own task, so detections for
/// different events run concurrently.
pub struct AntinukeHandler {
    orchestrator: Arc<DetectionOrchestrator>,
    guild_logger: Option<Arc<GuildLogger>>,
}

impl AntinukeHandler {
    /// Handler driving `orchestrator`.
    pub fn new(orchestrator: Arc<DetectionOrchestrator>) -> Self {
        Self {
            orchestrator,
            guild_logger: None,
        }
    }

    /// Also report guilds the bot joins and leaves.
    pub fn with_guild_logger(mut self, logger: Arc<GuildLogger>) -> Self {
        self.guild_logger = Some(logger);
        self
    }

    /// Gateway intents needed for the watched events.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MODERATION
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_WEBHOOKS
    }

    async fn detect(&self, kind: EventKind, guild_id: GuildId) {
        let event = AdminEvent::new(kind, from_guild_id(guild_id));

        match self.orchestrator.handle(event).await {
            DetectionOutcome::Punished { event, report, .. } => {
                if report.is_applied() {
                    info!(
                        guild_id = %guild_id,
                        actor = %event.actor,
                        punishment = %report.summary(),
                        "Nuke attempt stopped"
                    );
                } else {
                    warn!(
                        guild_id = %guild_id,
                        actor = %event.actor,
                        punishment = %report.summary(),
                        "Threshold exceeded but punishment did not take effect"
                    );
                }
            }
            DetectionOutcome::Unattributed(e) => {
                debug!(guild_id = %guild_id, %kind, error = %e, "Event not attributed");
            }
            outcome => debug!(guild_id = %guild_id, %kind, ?outcome, "Event handled"),
        }
    }
}

#[async_trait]
impl EventHandler for AntinukeHandler {
    /// Called when the bot successfully connects to Discord.
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Anti-nuke connected to Discord"
        );
    }

    /// Without a cache `is_new` is `None`, so every guild delivered at
    /// startup is reported as well.
    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new == Some(false) {
            return;
        }
        if let Some(logger) = &self.guild_logger {
            info!(guild_id = %guild.id, name = %guild.name, "Joined guild");
            logger.joined(&guild_summary(&guild)).await;
        }
    }

    async fn guild_delete(
        &self,
        _ctx: Context,
        incomplete: UnavailableGuild,
        full: Option<Guild>,
    ) {
        if incomplete.unavailable {
            warn!(guild_id = %incomplete.id, "Guild became unavailable");
            return;
        }
        if let Some(logger) = &self.guild_logger {
            info!(guild_id = %incomplete.id, "Left guild");
            let summary = full.as_ref().map(guild_summary).unwrap_or(GuildSummary {
                id: from_guild_id(incomplete.id),
                name: None,
                member_count: None,
                owner: None,
            });
            logger.left(&summary).await;
        }
    }

    async fn channel_delete(
        &self,
        _ctx: Context,
        channel: GuildChannel,
        _messages: Option<Vec<Message>>,
    ) {
        debug!(channel_id = %channel.id, "Channel deleted");
        self.detect(EventKind::ChannelDelete, channel.guild_id)
            .await;
    }

    async fn guild_role_delete(
        &self,
        _ctx: Context,
        guild_id: GuildId,
        removed_role_id: RoleId,
        _removed_role_data_if_available: Option<Role>,
    ) {
        debug!(role_id = %removed_role_id, "Role deleted");
        self.detect(EventKind::RoleDelete, guild_id).await;
    }

    async fn guild_ban_addition(&self, _ctx: Context, guild_id: GuildId, banned_user: User) {
        debug!(user_id = %banned_user.id, "Member banned");
        self.detect(EventKind::BanAdd, guild_id).await;
    }

    /// Fires for kicks and voluntary leaves alike; attribution sorts them out.
    async fn guild_member_removal(
        &self,
        _ctx: Context,
        guild_id: GuildId,
        user: User,
        _member_data_if_available: Option<Member>,
    ) {
        debug!(user_id = %user.id, "Member removed");
        self.detect(EventKind::MemberKick, guild_id).await;
    }

    async fn webhook_update(
        &self,
        _ctx: Context,
        guild_id: GuildId,
        belongs_to_channel_id: ChannelId,
    ) {
        debug!(channel_id = %belongs_to_channel_id, "Webhooks updated");
        self.detect(EventKind::WebhookChange, guild_id).await;
    }

    async fn guild_update(
        &self,
        _ctx: Context,
        _old_data_if_available: Option<Guild>,
        new_data: PartialGuild,
    ) {
        self.detect(EventKind::GuildSettingsChange, new_data.id)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents_cover_watched_events() {
        let intents = AntinukeHandler::intents();
        assert!(intents.contains(GatewayIntents::GUILDS));
        assert!(intents.contains(GatewayIntents::GUILD_MODERATION));
        assert!(intents.contains(GatewayIntents::GUILD_MEMBERS));
        assert!(intents.contains(GatewayIntents::GUILD_WEBHOOKS));
        assert!(!intents.contains(GatewayIntents::MESSAGE_CONTENT));
    }
}
