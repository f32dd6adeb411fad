//! Aware - anti-nuke protection for Discord guilds.
//!
//! Aware watches destructive administrative actions (channel and role
//! deletions, bans, kicks, webhook and guild changes), attributes each one to
//! the acting user through the audit log, and punishes users who exceed their
//! guild's per-minute or per-hour budget. Every detection is reported to a
//! detection log and a moderation log.
//!
//! # Architecture
//!
//! - `aware_error` - Error types
//! - `aware_core` - Identifiers, guild policies, events, embeds, configuration
//! - `aware_interface` - Capability traits and in-memory stores
//! - `aware_rate_limit` - Per-user action windows
//! - `aware_database` - SQLite policy and exemption stores
//! - `aware_antinuke` - Detection pipeline
//! - `aware_social` - Discord adapters
//!
//! This crate (`aware`) re-exports everything for convenience.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aware::{AwareConfig, DetectionOrchestrator, SqliteExemptionStore, SqlitePolicyStore};
//! use std::sync::Arc;
//!
//! # async fn run(token: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let config = AwareConfig::load()?;
//! let conn = aware::open(&config.database.url)?;
//! let policies = Arc::new(SqlitePolicyStore::from_arc(conn.clone()));
//! let exemptions = Arc::new(SqliteExemptionStore::from_arc(conn));
//!
//! let capabilities =
//!     aware::discord_capabilities(token, &config.notifications.username, policies, exemptions)?;
//! let orchestrator = Arc::new(DetectionOrchestrator::new(capabilities, &config));
//!
//! let mut bot = aware::AwareBot::new(token, orchestrator).await?;
//! bot.start().await?;
//! # Ok(())
//! # }
//! ```

pub use aware_antinuke::*;
pub use aware_core::*;
pub use aware_database::*;
pub use aware_error::*;
pub use aware_interface::*;
pub use aware_rate_limit::*;
pub use aware_social::*;
