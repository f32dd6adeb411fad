//! The rate accountant.

use crate::{ActionWindow, Clock, SystemClock, Verdict};
use aware_core::{ActionLimits, GuildId, UserId};
use aware_interface::PolicyStore;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Where the thresholds for a decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSource {
    /// The guild's stored policy.
    Policy,
    /// No policy row exists.
    Fallback,
    /// The policy store failed; fallback used.
    StoreUnavailable,
}

/// Per-(guild, user) action counters with admit/deny decisions.
///
/// Windows live in a sharded map. Each decision holds exactly one shard entry
/// for the read-modify-write; distinct pairs proceed concurrently. Thresholds
/// are fetched before the entry is locked.
///
/// State is in memory only and lost on restart.
pub struct RateAccountant {
    windows: DashMap<(GuildId, UserId), ActionWindow>,
    policies: Arc<dyn PolicyStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RateAccountant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateAccountant")
            .field("tracked", &self.windows.len())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl RateAccountant {
    /// Accountant on the system clock.
    pub fn new(policies: Arc<dyn PolicyStore>) -> Self {
        Self::with_clock(policies, Arc::new(SystemClock))
    }

    /// Accountant on an injected clock.
    pub fn with_clock(policies: Arc<dyn PolicyStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: DashMap::new(),
            policies,
            clock,
        }
    }

    /// Thresholds for a guild, falling back to 2/10 without a usable policy.
    pub async fn limits_for(&self, guild: GuildId) -> (ActionLimits, LimitSource) {
        match self.policies.get_policy(guild).await {
            Ok(Some(policy)) => (policy.limits(), LimitSource::Policy),
            Ok(None) => (ActionLimits::FALLBACK, LimitSource::Fallback),
            Err(e) => {
                warn!(guild = %guild, error = %e, "Policy lookup failed, using fallback thresholds");
                (ActionLimits::FALLBACK, LimitSource::StoreUnavailable)
            }
        }
    }

    /// Records one attributed action and returns the verdict.
    #[instrument(skip(self), fields(guild = %guild, user = %user))]
    pub async fn record(&self, guild: GuildId, user: UserId) -> Verdict {
        let (limits, source) = self.limits_for(guild).await;
        let verdict = self.record_within(guild, user, limits);

        match verdict {
            Verdict::Admitted => debug!(?source, "Action admitted"),
            Verdict::Denied {
                minute_count,
                hour_count,
            } => debug!(
                ?source,
                minute_count,
                hour_count,
                per_minute = limits.per_minute(),
                per_hour = limits.per_hour(),
                "Action rate exceeded"
            ),
        }
        verdict
    }

    /// Records one attributed action; `true` when still within thresholds.
    pub async fn admit(&self, guild: GuildId, user: UserId) -> bool {
        self.record(guild, user).await.is_admitted()
    }

    /// Critical section: lookup-or-create, reset, compare, increment.
    fn record_within(&self, guild: GuildId, user: UserId, limits: ActionLimits) -> Verdict {
        let now = self.clock.now();
        let mut window = self
            .windows
            .entry((guild, user))
            .or_insert_with(|| ActionWindow::new(now));
        window.record(now, limits)
    }

    /// Number of tracked (guild, user) pairs.
    pub fn tracked(&self) -> usize {
        self.windows.len()
    }

    /// Drops pairs whose windows have both elapsed. Returns how many went.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.windows.retain(|_, window| {
            let keep = !window.is_stale(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            debug!(removed, remaining = self.windows.len(), "Swept stale action windows");
        }
        removed
    }

    /// Runs [`sweep`](Self::sweep) every `period` until the handle is aborted.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let accountant = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                accountant.sweep();
            }
        })
    }
}
