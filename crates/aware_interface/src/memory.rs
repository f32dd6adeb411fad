//! In-memory policy and exemption stores.
//!
//! HashMaps behind RwLocks. All data is lost when the store is dropped.

use crate::{ExemptionStore, PolicyStore};
use async_trait::async_trait;
use aware_core::{ExemptionEntry, GuildId, GuildPolicy, UserId};
use aware_error::AwareResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Policy store backed by a HashMap.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPolicyStore {
    policies: Arc<RwLock<HashMap<GuildId, GuildPolicy>>>,
}

impl InMemoryPolicyStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of configured guilds (for testing).
    pub async fn len(&self) -> usize {
        self.policies.read().await.len()
    }

    /// Whether no guild is configured (for testing).
    pub async fn is_empty(&self) -> bool {
        self.policies.read().await.is_empty()
    }
}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn get_policy(&self, guild: GuildId) -> AwareResult<Option<GuildPolicy>> {
        Ok(self.policies.read().await.get(&guild).cloned())
    }

    async fn set_policy(&self, policy: &GuildPolicy) -> AwareResult<()> {
        self.policies
            .write()
            .await
            .insert(*policy.guild_id(), policy.clone());
        Ok(())
    }

    async fn ensure_default(&self, guild: GuildId) -> AwareResult<GuildPolicy> {
        let mut policies = self.policies.write().await;
        Ok(policies
            .entry(guild)
            .or_insert_with(|| GuildPolicy::new(guild))
            .clone())
    }

    async fn delete_policy(&self, guild: GuildId) -> AwareResult<bool> {
        Ok(self.policies.write().await.remove(&guild).is_some())
    }
}

/// Exemption store backed by a HashMap.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExemptionStore {
    entries: Arc<RwLock<HashMap<(GuildId, UserId), ExemptionEntry>>>,
}

impl InMemoryExemptionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExemptionStore for InMemoryExemptionStore {
    async fn is_exempt(&self, guild: GuildId, user: UserId) -> AwareResult<bool> {
        Ok(self.entries.read().await.contains_key(&(guild, user)))
    }

    async fn add(&self, entry: &ExemptionEntry) -> AwareResult<()> {
        self.entries
            .write()
            .await
            .insert((*entry.guild_id(), *entry.user_id()), entry.clone());
        Ok(())
    }

    async fn remove(&self, guild: GuildId, user: UserId) -> AwareResult<bool> {
        Ok(self.entries.write().await.remove(&(guild, user)).is_some())
    }

    async fn list(&self, guild: GuildId) -> AwareResult<Vec<ExemptionEntry>> {
        let mut entries: Vec<ExemptionEntry> = self
            .entries
            .read()
            .await
            .values()
            .filter(|entry| *entry.guild_id() == guild)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| *entry.granted_at());
        Ok(entries)
    }
}
