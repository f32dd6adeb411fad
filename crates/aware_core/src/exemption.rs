//! Exemption (whitelist) entries.

use crate::{GuildId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user whose actions are logged but never counted or punished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ExemptionEntry {
    /// Guild the exemption applies to.
    guild_id: GuildId,
    /// Exempt user.
    user_id: UserId,
    /// Who granted it.
    granted_by: UserId,
    /// When it was granted.
    granted_at: DateTime<Utc>,
}

impl ExemptionEntry {
    /// Creates an entry.
    pub fn new(
        guild_id: GuildId,
        user_id: UserId,
        granted_by: UserId,
        granted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            guild_id,
            user_id,
            granted_by,
            granted_at,
        }
    }
}
