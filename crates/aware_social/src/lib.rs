//! Discord adapters for the Aware anti-nuke engine.
//!
//! The detection pipeline only sees the capability traits from
//! `aware_interface`; this crate implements them over serenity and plain
//! webhook HTTP, and feeds gateway events into a
//! [`DetectionOrchestrator`](aware_antinuke::DetectionOrchestrator).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod client;
mod conversions;
mod error;
mod guild_log;
mod handler;
mod moderation;
mod webhook;

pub use audit::SerenityAuditTrail;
pub use client::{AwareBot, discord_capabilities};
pub use conversions::{
    from_guild_id, guild_summary, to_audit_action, to_guild_id, to_role_id, to_user_id,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use guild_log::GuildLogger;
pub use handler::AntinukeHandler;
pub use moderation::SerenityModeration;
pub use webhook::WebhookTransport;
