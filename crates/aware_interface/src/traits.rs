//! Capability traits.

use async_trait::async_trait;
use aware_core::{AuditAction, ExemptionEntry, GuildId, GuildPolicy, LogEmbed, RoleId, UserId};
use aware_error::AwareResult;

/// Read access to a guild's audit log.
#[async_trait]
pub trait AuditTrail: Send + Sync {
    /// Actor of the most recent audit entry of `action`, if any.
    async fn latest_actor(&self, guild: GuildId, action: AuditAction)
        -> AwareResult<Option<UserId>>;
}

/// Durable per-guild policy storage.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Stored policy, or `None` when the guild was never configured.
    async fn get_policy(&self, guild: GuildId) -> AwareResult<Option<GuildPolicy>>;

    /// Inserts or replaces the policy row.
    async fn set_policy(&self, policy: &GuildPolicy) -> AwareResult<()>;

    /// Inserts the default row if none exists and returns the stored row.
    async fn ensure_default(&self, guild: GuildId) -> AwareResult<GuildPolicy>;

    /// Deletes the policy row. Returns whether one existed.
    async fn delete_policy(&self, guild: GuildId) -> AwareResult<bool>;
}

/// Durable per-guild exemption storage.
#[async_trait]
pub trait ExemptionStore: Send + Sync {
    /// Whether `user` is exempt in `guild`.
    async fn is_exempt(&self, guild: GuildId, user: UserId) -> AwareResult<bool>;

    /// Inserts or replaces an entry.
    async fn add(&self, entry: &ExemptionEntry) -> AwareResult<()>;

    /// Removes an entry. Returns whether one existed.
    async fn remove(&self, guild: GuildId, user: UserId) -> AwareResult<bool>;

    /// Every entry of a guild.
    async fn list(&self, guild: GuildId) -> AwareResult<Vec<ExemptionEntry>>;
}

/// Moderation calls against the platform.
///
/// `reason` is recorded in the platform's audit log.
#[async_trait]
pub trait ModerationActions: Send + Sync {
    /// Removes the member from the guild.
    async fn kick(&self, guild: GuildId, user: UserId, reason: &str) -> AwareResult<()>;

    /// Bans the member.
    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> AwareResult<()>;

    /// Roles currently held by the member.
    async fn member_roles(&self, guild: GuildId, user: UserId) -> AwareResult<Vec<RoleId>>;

    /// Takes a role away from the member.
    async fn remove_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> AwareResult<()>;

    /// Gives a role to the member.
    async fn add_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> AwareResult<()>;
}

/// Delivery of log embeds to a destination (a webhook URL).
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Sends one embed. A single attempt; retries are the caller's concern.
    async fn send_embed(&self, destination: &str, embed: &LogEmbed) -> AwareResult<()>;
}
