//! Whitelist grants and lookups.


use antinuke_test_helpers::{ADMIN, ATTACKER, GUILD};
use async_trait::async_trait;
use aware_antinuke::ExemptionRegistry;
use aware_core::{ExemptionEntry, GuildId, UserId};
use aware_error::{AwareResult, PlatformError, PlatformErrorKind};
use aware_interface::{ExemptionStore, InMemoryExemptionStore};
use std::sync::Arc;

#[tokio::test]
async fn test_grant_list_revoke() {
    let registry = ExemptionRegistry::new(Arc::new(InMemoryExemptionStore::new()));

    assert!(!registry.is_exempt(GUILD, ATTACKER).await);
    let entry = registry.grant(GUILD, ATTACKER, ADMIN).await.expect("grant");
    assert_eq!(*entry.granted_by(), ADMIN);
    assert!(registry.is_exempt(GUILD, ATTACKER).await);
    assert!(!registry.is_exempt(GuildId::new(1), ATTACKER).await);

    let listed = registry.list(GUILD).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(*listed[0].user_id(), ATTACKER);

    assert!(registry.revoke(GUILD, ATTACKER).await.expect("revoke"));
    assert!(!registry.revoke(GUILD, ATTACKER).await.expect("revoke again"));
    assert!(!registry.is_exempt(GUILD, ATTACKER).await);
}

struct UnreachableExemptions;

#[async_trait]
impl ExemptionStore for UnreachableExemptions {
    async fn is_exempt(&self, _guild: GuildId, _user: UserId) -> AwareResult<bool> {
        Err(PlatformError::new(PlatformErrorKind::Unavailable("db down".into())).into())
    }

    async fn add(&self, _entry: &ExemptionEntry) -> AwareResult<()> {
        Err(PlatformError::new(PlatformErrorKind::Unavailable("db down".into())).into())
    }

    async fn remove(&self, _guild: GuildId, _user: UserId) -> AwareResult<bool> {
        Err(PlatformError::new(PlatformErrorKind::Unavailable("db down".into())).into())
    }

    async fn list(&self, _guild: GuildId) -> AwareResult<Vec<ExemptionEntry>> {
        Err(PlatformError::new(PlatformErrorKind::Unavailable("db down".into())).into())
    }
}

#[tokio::test]
async fn test_store_failure_counts_as_not_exempt() {
    let registry = ExemptionRegistry::new(Arc::new(UnreachableExemptions));

    assert!(!registry.is_exempt(GUILD, ATTACKER).await);
    assert!(registry.grant(GUILD, ATTACKER, ADMIN).await.is_err());
}
