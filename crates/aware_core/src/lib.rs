//! Core data types for the Aware anti-nuke engine.
//!
//! This crate provides the identifiers, policy and event types shared by every
//! stage of the detection pipeline, along with configuration loading and
//! tracing setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod embed;
mod event;
mod exemption;
mod id;
mod policy;
mod punishment;
mod telemetry;
mod webhook;

pub use config::{
    AwareConfig, DatabaseConfig, EmbedConfig, LoggingConfig, NotificationConfig, PunishmentConfig,
    RateLimitConfig,
};
pub use embed::{
    DETECTION_COLOR, GUILD_JOIN_COLOR, GUILD_LEAVE_COLOR, GuildSummary, LogEmbed, MODERATION_COLOR,
    WHITELISTED_ANNOTATION,
};
pub use event::{AdminEvent, AttributedEvent, AuditAction, EventKind};
pub use exemption::ExemptionEntry;
pub use id::{ChannelId, GuildId, RoleId, UserId};
pub use policy::{
    ActionLimits, DEFAULT_ACTIONS_PER_HOUR, DEFAULT_ACTIONS_PER_MINUTE, FALLBACK_ACTIONS_PER_HOUR,
    FALLBACK_ACTIONS_PER_MINUTE, GuildPolicy, GuildPolicyBuilder, PunishmentType,
};
pub use punishment::PunishmentRecord;
pub use telemetry::init_tracing;
pub use webhook::WebhookUrl;
