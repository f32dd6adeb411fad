//! Tests for the rate accountant.

use async_trait::async_trait;
use aware_core::{ActionLimits, GuildId, GuildPolicy, UserId};
use aware_error::{AwareResult, DatabaseError, DatabaseErrorKind};
use aware_interface::{InMemoryPolicyStore, PolicyStore};
use aware_rate_limit::{LimitSource, MockClock, RateAccountant, Verdict};
use std::sync::Arc;
use std::time::Duration;

const GUILD: GuildId = GuildId::new(100);
const USER: UserId = UserId::new(200);

fn accountant_with(policies: Arc<dyn PolicyStore>) -> (RateAccountant, MockClock) {
    let clock = MockClock::default();
    (
        RateAccountant::with_clock(policies, Arc::new(clock.clone())),
        clock,
    )
}

async fn store_with_limits(per_minute: u32, per_hour: u32) -> Arc<InMemoryPolicyStore> {
    let store = Arc::new(InMemoryPolicyStore::new());
    let policy = GuildPolicy::new(GUILD)
        .with_limits(ActionLimits::new(per_minute, per_hour).expect("valid limits"));
    store.set_policy(&policy).await.expect("store policy");
    store
}

/// Store that always fails, standing in for an unreachable database.
struct BrokenPolicyStore;

#[async_trait]
impl PolicyStore for BrokenPolicyStore {
    async fn get_policy(&self, _guild: GuildId) -> AwareResult<Option<GuildPolicy>> {
        Err(DatabaseError::new(DatabaseErrorKind::Connection("refused".into())).into())
    }

    async fn set_policy(&self, _policy: &GuildPolicy) -> AwareResult<()> {
        Err(DatabaseError::new(DatabaseErrorKind::Connection("refused".into())).into())
    }

    async fn ensure_default(&self, _guild: GuildId) -> AwareResult<GuildPolicy> {
        Err(DatabaseError::new(DatabaseErrorKind::Connection("refused".into())).into())
    }

    async fn delete_policy(&self, _guild: GuildId) -> AwareResult<bool> {
        Err(DatabaseError::new(DatabaseErrorKind::Connection("refused".into())).into())
    }
}

#[tokio::test]
async fn test_threshold_plus_one_is_denied() {
    let (accountant, _clock) = accountant_with(store_with_limits(5, 20).await);

    for _ in 0..5 {
        assert!(accountant.admit(GUILD, USER).await);
    }
    assert_eq!(
        accountant.record(GUILD, USER).await,
        Verdict::Denied {
            minute_count: 5,
            hour_count: 5
        }
    );
}

#[tokio::test]
async fn test_minute_reset_readmits_before_hour_reset() {
    let (accountant, clock) = accountant_with(store_with_limits(2, 20).await);

    assert!(accountant.admit(GUILD, USER).await);
    assert!(accountant.admit(GUILD, USER).await);
    assert!(!accountant.admit(GUILD, USER).await);

    clock.advance(Duration::from_secs(60));
    assert!(accountant.admit(GUILD, USER).await);
    assert!(accountant.admit(GUILD, USER).await);
    assert!(!accountant.admit(GUILD, USER).await);
}

#[tokio::test]
async fn test_denials_do_not_extend_the_penalty() {
    let (accountant, clock) = accountant_with(store_with_limits(1, 3).await);

    assert!(accountant.admit(GUILD, USER).await);
    for _ in 0..10 {
        assert!(!accountant.admit(GUILD, USER).await);
    }

    // Denials left the hour counter at 1, so two more minutes fit.
    clock.advance(Duration::from_secs(60));
    assert!(accountant.admit(GUILD, USER).await);
    clock.advance(Duration::from_secs(60));
    assert!(accountant.admit(GUILD, USER).await);
    clock.advance(Duration::from_secs(60));
    assert!(!accountant.admit(GUILD, USER).await);
}

#[tokio::test]
async fn test_pairs_are_independent() {
    let (accountant, _clock) = accountant_with(store_with_limits(1, 10).await);
    let other_user = UserId::new(201);
    let other_guild = GuildId::new(101);

    assert!(accountant.admit(GUILD, USER).await);
    assert!(!accountant.admit(GUILD, USER).await);
    assert!(accountant.admit(GUILD, other_user).await);
    // Unconfigured guild, same user: fallback thresholds.
    assert!(accountant.admit(other_guild, USER).await);
    assert_eq!(accountant.tracked(), 3);
}

#[tokio::test]
async fn test_fallback_then_ensure_default() {
    let store = Arc::new(InMemoryPolicyStore::new());
    let (accountant, clock) = accountant_with(store.clone());

    assert_eq!(
        accountant.limits_for(GUILD).await,
        (ActionLimits::FALLBACK, LimitSource::Fallback)
    );
    assert!(accountant.admit(GUILD, USER).await);
    assert!(accountant.admit(GUILD, USER).await);
    assert!(!accountant.admit(GUILD, USER).await);

    store.ensure_default(GUILD).await.expect("ensure default");
    assert_eq!(
        accountant.limits_for(GUILD).await,
        (ActionLimits::DEFAULT, LimitSource::Policy)
    );

    clock.advance(Duration::from_secs(60));
    for _ in 0..5 {
        assert!(accountant.admit(GUILD, USER).await);
    }
    assert!(!accountant.admit(GUILD, USER).await);
}

#[tokio::test]
async fn test_store_failure_uses_fallback() {
    let (accountant, _clock) = accountant_with(Arc::new(BrokenPolicyStore));

    assert_eq!(
        accountant.limits_for(GUILD).await,
        (ActionLimits::FALLBACK, LimitSource::StoreUnavailable)
    );
    assert!(accountant.admit(GUILD, USER).await);
    assert!(accountant.admit(GUILD, USER).await);
    assert!(!accountant.admit(GUILD, USER).await);
}

// Fixed windows under-detect a burst that straddles a reset: five actions
// inside three seconds pass a threshold of three.
#[tokio::test]
async fn test_boundary_burst_is_under_detected() {
    let (accountant, clock) = accountant_with(store_with_limits(3, 20).await);

    assert!(accountant.admit(GUILD, USER).await);
    clock.advance(Duration::from_secs(57));
    assert!(accountant.admit(GUILD, USER).await);
    assert!(accountant.admit(GUILD, USER).await);

    clock.advance(Duration::from_secs(3));
    for _ in 0..3 {
        assert!(accountant.admit(GUILD, USER).await);
    }
    assert!(!accountant.admit(GUILD, USER).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_admits_never_exceed_threshold() {
    let (accountant, _clock) = accountant_with(store_with_limits(5, 20).await);
    let accountant = Arc::new(accountant);

    let tasks = (0..64).map(|_| {
        let accountant = Arc::clone(&accountant);
        tokio::spawn(async move { accountant.admit(GUILD, USER).await })
    });
    let admitted = futures::future::join_all(tasks)
        .await
        .into_iter()
        .filter(|result| matches!(result, Ok(true)))
        .count();

    assert_eq!(admitted, 5);
}

#[tokio::test]
async fn test_sweep_drops_only_stale_pairs() {
    let (accountant, clock) = accountant_with(store_with_limits(5, 20).await);

    accountant.admit(GUILD, USER).await;
    clock.advance(Duration::from_secs(3000));
    accountant.admit(GUILD, UserId::new(201)).await;
    clock.advance(Duration::from_secs(600));

    assert_eq!(accountant.sweep(), 1);
    assert_eq!(accountant.tracked(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_runs_periodically() {
    let (accountant, clock) = accountant_with(store_with_limits(5, 20).await);
    let accountant = Arc::new(accountant);

    accountant.admit(GUILD, USER).await;
    let sweeper = accountant.spawn_sweeper(Duration::from_secs(300));

    clock.advance(Duration::from_secs(3600));
    tokio::time::sleep(Duration::from_secs(450)).await;

    assert_eq!(accountant.tracked(), 0);
    sweeper.abort();
}

#[tokio::test]
async fn test_first_action_is_admitted_under_smallest_policy() {
    assert!(
        GuildPolicy::builder()
            .guild_id(GUILD)
            .actions_per_minute(0u32)
            .build()
            .is_err()
    );

    let (accountant, _clock) = accountant_with(store_with_limits(1, 1).await);

    assert!(accountant.admit(GUILD, USER).await);
    assert!(!accountant.admit(GUILD, USER).await);
}
