//! Log payloads sent to detection and moderation destinations.

use crate::{GuildId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sidebar colour of detection logs.
pub const DETECTION_COLOR: u32 = 0xff6b6b;
/// Sidebar colour of moderation logs.
pub const MODERATION_COLOR: u32 = 0xff0000;
/// Sidebar colour of "Bot Joined New Guild".
pub const GUILD_JOIN_COLOR: u32 = 0x00ff00;
/// Sidebar colour of "Bot Left Guild".
pub const GUILD_LEAVE_COLOR: u32 = 0xff0000;
/// Appended to the reason when the actor is exempt.
pub const WHITELISTED_ANNOTATION: &str = " (Action allowed - User is whitelisted)";

/// A single rich log entry.
///
/// # Examples
///
/// ```
/// use aware_core::{LogEmbed, UserId};
///
/// let embed = LogEmbed::detection(
///     UserId::new(7),
///     "Channel Deletion",
///     "Mass Channel Deletion Detected",
///     "Server Secured by Aware",
/// );
/// assert_eq!(embed.title(), "Anti-Nuke Detection");
/// assert!(embed.description().starts_with("**User:** <@7>"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct LogEmbed {
    /// Heading.
    title: String,
    /// Markdown body.
    description: String,
    /// Sidebar colour as 0xRRGGBB.
    color: u32,
    /// Footer text.
    footer: String,
    /// Creation time, serialized as RFC 3339.
    timestamp: DateTime<Utc>,
}

impl LogEmbed {
    /// "Anti-Nuke Detection" entry for the detection log.
    pub fn detection(user: UserId, action: &str, reason: &str, footer: &str) -> Self {
        Self {
            title: "Anti-Nuke Detection".to_string(),
            description: format!(
                "**User:** {}\n**Action:** {}\n**Reason:** {}",
                user.mention(),
                action,
                reason
            ),
            color: DETECTION_COLOR,
            footer: footer.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// "Punishment Applied" entry for the moderation log.
    pub fn punishment(user: UserId, violation: &str, punishment: &str, footer: &str) -> Self {
        Self {
            title: "Punishment Applied".to_string(),
            description: format!(
                "**User:** {}\n**Violation:** {}\n**Punishment:** {}",
                user.mention(),
                violation,
                punishment
            ),
            color: MODERATION_COLOR,
            footer: footer.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// What the bot knows about a guild it joined or left.
///
/// Fields other than the id may be missing when a guild is left without a
/// cached copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSummary {
    /// Guild id.
    pub id: GuildId,
    /// Display name.
    pub name: Option<String>,
    /// Member count at the time of the event.
    pub member_count: Option<u64>,
    /// Owner.
    pub owner: Option<UserId>,
}

impl GuildSummary {
    fn fields(&self) -> String {
        let unknown = || "Unknown".to_string();
        format!(
            "**Guild Name:** {}\n**Guild ID:** {}\n**Member Count:** {}\n**Owner ID:** {}",
            self.name.clone().unwrap_or_else(unknown),
            self.id,
            self.member_count
                .map(|count| format!("{} members", count))
                .unwrap_or_else(unknown),
            self.owner.map(|id| id.to_string()).unwrap_or_else(unknown),
        )
    }
}

impl LogEmbed {
    /// "Bot Joined New Guild" entry for the bot log.
    pub fn guild_joined(guild: &GuildSummary) -> Self {
        Self {
            title: "Bot Joined New Guild".to_string(),
            description: guild.fields(),
            color: GUILD_JOIN_COLOR,
            footer: "Bot Guild Join Log".to_string(),
            timestamp: Utc::now(),
        }
    }

    /// "Bot Left Guild" entry for the bot log.
    pub fn guild_left(guild: &GuildSummary) -> Self {
        let now = Utc::now();
        Self {
            title: "Bot Left Guild".to_string(),
            description: format!(
                "{}\n**Left At:** {}",
                guild.fields(),
                now.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            color: GUILD_LEAVE_COLOR,
            footer: "Bot Guild Leave Log".to_string(),
            timestamp: now,
        }
    }
}
