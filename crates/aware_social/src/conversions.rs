//! Conversions between Aware identifiers and serenity models.

use aware_core::{AuditAction, GuildId, GuildSummary, RoleId, UserId};
use serenity::all::{
    Guild, GuildId as SerenityGuildId, RoleId as SerenityRoleId, UserId as SerenityUserId,
};
use serenity::model::guild::audit_log::{
    Action, ChannelAction, MemberAction, RoleAction, WebhookAction,
};

/// Serenity guild id for an Aware one.
pub fn to_guild_id(id: GuildId) -> SerenityGuildId {
    SerenityGuildId::new(id.get())
}

/// Aware guild id for a serenity one.
pub fn from_guild_id(id: SerenityGuildId) -> GuildId {
    GuildId::new(id.get())
}

/// Serenity user id for an Aware one.
pub fn to_user_id(id: UserId) -> SerenityUserId {
    SerenityUserId::new(id.get())
}

/// Serenity role id for an Aware one.
pub fn to_role_id(id: RoleId) -> SerenityRoleId {
    SerenityRoleId::new(id.get())
}

/// Guild log summary of a full guild.
pub fn guild_summary(guild: &Guild) -> GuildSummary {
    GuildSummary {
        id: from_guild_id(guild.id),
        name: Some(guild.name.clone()),
        member_count: Some(guild.member_count),
        owner: Some(UserId::new(guild.owner_id.get())),
    }
}

/// Audit log filter for an action.
pub fn to_audit_action(action: AuditAction) -> Action {
    match action {
        AuditAction::ChannelDelete => Action::Channel(ChannelAction::Delete),
        AuditAction::RoleDelete => Action::Role(RoleAction::Delete),
        AuditAction::MemberBanAdd => Action::Member(MemberAction::BanAdd),
        AuditAction::MemberKick => Action::Member(MemberAction::Kick),
        AuditAction::WebhookCreate => Action::Webhook(WebhookAction::Create),
        AuditAction::GuildUpdate => Action::GuildUpdate,
    }
}
