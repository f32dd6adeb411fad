//! Guild configuration commands.

use aware_core::{ActionLimits, ChannelId, GuildId, GuildPolicy, PunishmentType, RoleId, WebhookUrl};
use aware_error::AwareResult;
use aware_interface::PolicyStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Summary shown by "view config".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum PolicyStatus {
    /// A policy row exists and detection is on.
    Active,
    /// A policy row exists but detection is switched off.
    Disabled,
    /// No policy row; fallback thresholds apply.
    #[strum(serialize = "Not Configured")]
    NotConfigured,
}

/// Log wiring recorded by setup. Unset fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSetup {
    /// Detection log channel.
    pub log_channel: Option<ChannelId>,
    /// Moderation log channel.
    pub mod_log_channel: Option<ChannelId>,
    /// Detection log webhook URL.
    pub log_webhook: Option<String>,
    /// Moderation log webhook URL.
    pub mod_log_webhook: Option<String>,
    /// Quarantine role.
    pub quarantine_role: Option<RoleId>,
}

/// Configuration commands over the policy store.
///
/// Every mutating command first ensures the default row exists, so a guild
/// configured piecemeal starts from 5/20 quarantine.
#[derive(Clone)]
pub struct GuildPolicyManager {
    store: Arc<dyn PolicyStore>,
}

impl GuildPolicyManager {
    /// Manager over a store.
    pub fn new(store: Arc<dyn PolicyStore>) -> Self {
        Self { store }
    }

    /// Stored policy, if any.
    pub async fn view(&self, guild: GuildId) -> AwareResult<Option<GuildPolicy>> {
        self.store.get_policy(guild).await
    }

    /// "Active" only when a row exists and is enabled.
    pub async fn status(&self, guild: GuildId) -> AwareResult<PolicyStatus> {
        Ok(match self.store.get_policy(guild).await? {
            Some(policy) if *policy.enabled() => PolicyStatus::Active,
            Some(_) => PolicyStatus::Disabled,
            None => PolicyStatus::NotConfigured,
        })
    }

    /// Records log wiring and enables detection.
    ///
    /// # Errors
    ///
    /// Fails on a malformed webhook URL or a store error.
    #[instrument(skip(self, setup), fields(guild = %guild))]
    pub async fn setup(&self, guild: GuildId, setup: LogSetup) -> AwareResult<GuildPolicy> {
        for url in [&setup.log_webhook, &setup.mod_log_webhook].into_iter().flatten() {
            WebhookUrl::parse(url)?;
        }

        let mut policy = self.store.ensure_default(guild).await?.with_enabled(true);
        if let Some(channel) = setup.log_channel {
            policy = policy.with_log_channel(channel);
        }
        if let Some(channel) = setup.mod_log_channel {
            policy = policy.with_mod_log_channel(channel);
        }
        if let Some(url) = setup.log_webhook {
            policy = policy.with_log_webhook(url);
        }
        if let Some(url) = setup.mod_log_webhook {
            policy = policy.with_mod_log_webhook(url);
        }
        if let Some(role) = setup.quarantine_role {
            policy = policy.with_quarantine_role(role);
        }

        self.store.set_policy(&policy).await?;
        info!("Anti-nuke configured");
        Ok(policy)
    }

    /// Changes the sanction for violators.
    #[instrument(skip(self), fields(guild = %guild))]
    pub async fn set_punishment(
        &self,
        guild: GuildId,
        punishment: PunishmentType,
    ) -> AwareResult<GuildPolicy> {
        let policy = self
            .store
            .ensure_default(guild)
            .await?
            .with_punishment(punishment);
        self.store.set_policy(&policy).await?;
        info!(%punishment, "Punishment type updated");
        Ok(policy)
    }

    /// Changes both thresholds.
    ///
    /// # Errors
    ///
    /// "Values must be greater than 0" when either is zero.
    #[instrument(skip(self), fields(guild = %guild))]
    pub async fn set_limits(
        &self,
        guild: GuildId,
        per_minute: u32,
        per_hour: u32,
    ) -> AwareResult<GuildPolicy> {
        let limits = ActionLimits::new(per_minute, per_hour)?;
        let policy = self.store.ensure_default(guild).await?.with_limits(limits);
        self.store.set_policy(&policy).await?;
        info!(per_minute, per_hour, "Action limits updated");
        Ok(policy)
    }

    /// Switches detection on or off.
    #[instrument(skip(self), fields(guild = %guild))]
    pub async fn set_enabled(&self, guild: GuildId, enabled: bool) -> AwareResult<GuildPolicy> {
        let policy = self
            .store
            .ensure_default(guild)
            .await?
            .with_enabled(enabled);
        self.store.set_policy(&policy).await?;
        info!(enabled, "Detection toggled");
        Ok(policy)
    }

    /// Deletes the policy row. Returns whether one existed.
    #[instrument(skip(self), fields(guild = %guild))]
    pub async fn teardown(&self, guild: GuildId) -> AwareResult<bool> {
        let removed = self.store.delete_policy(guild).await?;
        info!(removed, "Anti-nuke torn down");
        Ok(removed)
    }
}
