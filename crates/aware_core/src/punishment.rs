//! Punishment records.

use crate::{GuildId, PunishmentType, RoleId, UserId};
use serde::{Deserialize, Serialize};

/// What the punishment engine did (or tried to do) to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PunishmentRecord {
    /// Guild the sanction applies in.
    guild_id: GuildId,
    /// Sanctioned user.
    user_id: UserId,
    /// Sanction kind.
    punishment: PunishmentType,
    /// Violation that triggered it.
    reason: String,
    /// Roles held before a quarantine; empty otherwise.
    prior_roles: Vec<RoleId>,
}

impl PunishmentRecord {
    /// Record without a role snapshot.
    pub fn new(
        guild_id: GuildId,
        user_id: UserId,
        punishment: PunishmentType,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            guild_id,
            user_id,
            punishment,
            reason: reason.into(),
            prior_roles: Vec::new(),
        }
    }

    /// Attaches the quarantine role snapshot.
    pub fn with_prior_roles(mut self, roles: Vec<RoleId>) -> Self {
        self.prior_roles = roles;
        self
    }
}
