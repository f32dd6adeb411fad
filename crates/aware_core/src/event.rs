//! Administrative events and their attribution.

use crate::{GuildId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of administrative action observed on a guild.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum EventKind {
    /// A channel was deleted.
    ChannelDelete,
    /// A role was deleted.
    RoleDelete,
    /// A member was banned.
    BanAdd,
    /// A member left or was removed.
    MemberKick,
    /// A webhook was created, updated or deleted.
    WebhookChange,
    /// Guild settings were changed.
    GuildSettingsChange,
}

/// Audit-log action type queried to attribute an event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum AuditAction {
    /// Channel deletion entry.
    ChannelDelete,
    /// Role deletion entry.
    RoleDelete,
    /// Ban entry.
    MemberBanAdd,
    /// Kick entry.
    MemberKick,
    /// Webhook creation entry.
    WebhookCreate,
    /// Guild update entry.
    GuildUpdate,
}

impl EventKind {
    /// Audit entry type that identifies the actor of this event.
    ///
    /// Webhook changes are looked up as creations; the gateway does not say
    /// which webhook operation happened.
    pub fn audit_action(self) -> AuditAction {
        match self {
            EventKind::ChannelDelete => AuditAction::ChannelDelete,
            EventKind::RoleDelete => AuditAction::RoleDelete,
            EventKind::BanAdd => AuditAction::MemberBanAdd,
            EventKind::MemberKick => AuditAction::MemberKick,
            EventKind::WebhookChange => AuditAction::WebhookCreate,
            EventKind::GuildSettingsChange => AuditAction::GuildUpdate,
        }
    }

    /// Short label shown as the "Action" of a detection log.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::ChannelDelete => "Channel Deletion",
            EventKind::RoleDelete => "Role Deletion",
            EventKind::BanAdd => "Member Ban",
            EventKind::MemberKick => "Member Kick",
            EventKind::WebhookChange => "Webhook Update",
            EventKind::GuildSettingsChange => "Guild Update",
        }
    }

    /// Violation reason used for detection logs and punishments.
    pub fn detection_reason(self) -> &'static str {
        match self {
            EventKind::ChannelDelete => "Mass Channel Deletion Detected",
            EventKind::RoleDelete => "Mass Role Deletion Detected",
            EventKind::BanAdd => "Mass Ban Detected",
            EventKind::MemberKick => "Mass Kick Detected",
            EventKind::WebhookChange => "Mass Webhook Creation/Deletion Detected",
            EventKind::GuildSettingsChange => "Suspicious Guild Updates Detected",
        }
    }
}

/// An event as delivered by the gateway, before attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminEvent {
    /// What happened.
    pub kind: EventKind,
    /// Where it happened.
    pub guild_id: GuildId,
    /// When the event reached us.
    pub received_at: DateTime<Utc>,
}

impl AdminEvent {
    /// Stamps an event with the current time.
    pub fn new(kind: EventKind, guild_id: GuildId) -> Self {
        Self {
            kind,
            guild_id,
            received_at: Utc::now(),
        }
    }

    /// Binds the event to the user who performed it.
    pub fn attribute(&self, actor: UserId) -> AttributedEvent {
        AttributedEvent {
            kind: self.kind,
            guild_id: self.guild_id,
            actor,
            timestamp: self.received_at,
        }
    }
}

/// An event bound to the user who performed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedEvent {
    /// What happened.
    pub kind: EventKind,
    /// Where it happened.
    pub guild_id: GuildId,
    /// Who did it.
    pub actor: UserId,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}
