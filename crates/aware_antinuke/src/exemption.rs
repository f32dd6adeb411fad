//! Exemption registry.

use aware_core::{ExemptionEntry, GuildId, UserId};
use aware_error::AwareResult;
use aware_interface::ExemptionStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Per-guild whitelist of users whose actions are never counted or punished.
#[derive(Clone)]
pub struct ExemptionRegistry {
    store: Arc<dyn ExemptionStore>,
}

impl ExemptionRegistry {
    /// Registry over a store.
    pub fn new(store: Arc<dyn ExemptionStore>) -> Self {
        Self { store }
    }

    /// Whether the user is exempt. A failing store counts as "not exempt".
    pub async fn is_exempt(&self, guild: GuildId, user: UserId) -> bool {
        match self.store.is_exempt(guild, user).await {
            Ok(exempt) => exempt,
            Err(e) => {
                warn!(guild = %guild, user = %user, error = %e, "Exemption lookup failed, treating as not exempt");
                false
            }
        }
    }

    /// Exempts a user, replacing any previous grant.
    #[instrument(skip(self), fields(guild = %guild, user = %user, granted_by = %granted_by))]
    pub async fn grant(
        &self,
        guild: GuildId,
        user: UserId,
        granted_by: UserId,
    ) -> AwareResult<ExemptionEntry> {
        let entry = ExemptionEntry::new(guild, user, granted_by, Utc::now());
        self.store.add(&entry).await?;
        info!("User whitelisted");
        Ok(entry)
    }

    /// Removes an exemption. Returns whether one existed.
    #[instrument(skip(self), fields(guild = %guild, user = %user))]
    pub async fn revoke(&self, guild: GuildId, user: UserId) -> AwareResult<bool> {
        let removed = self.store.remove(guild, user).await?;
        if removed {
            info!("User removed from whitelist");
        }
        Ok(removed)
    }

    /// Every exemption of a guild.
    pub async fn list(&self, guild: GuildId) -> AwareResult<Vec<ExemptionEntry>> {
        self.store.list(guild).await
    }
}
