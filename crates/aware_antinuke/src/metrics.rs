//! Counters for the detection pipeline.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! counters {
    ($($field:ident => $record:ident: $doc:literal),* $(,)?) => {
        #[derive(Debug, Default)]
        struct DetectionMetricsInner {
            $($field: AtomicU64,)*
        }

        /// Point-in-time copy of every counter.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
        pub struct MetricsSnapshot {
            $(
                #[doc = $doc]
                pub $field: u64,
            )*
        }

        impl DetectionMetrics {
            $(
                #[doc = concat!("Records: ", $doc)]
                pub fn $record(&self) {
                    self.inner.$field.fetch_add(1, Ordering::Relaxed);
                }
            )*

            /// Copies every counter.
            pub fn snapshot(&self) -> MetricsSnapshot {
                MetricsSnapshot {
                    $($field: self.inner.$field.load(Ordering::Relaxed),)*
                }
            }
        }
    };
}

/// Shared counters; clones observe the same values.
#[derive(Debug, Clone, Default)]
pub struct DetectionMetrics {
    inner: Arc<DetectionMetricsInner>,
}

impl DetectionMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }
}

counters! {
    events => record_event: "events received",
    disabled => record_disabled: "events ignored because detection is off",
    unattributed => record_unattributed: "events dropped for lack of an actor",
    exempt => record_exempt: "actions by whitelisted users",
    admitted => record_admitted: "actions within thresholds",
    denied => record_denied: "actions over a threshold",
    punishments_applied => record_punishment_applied: "sanctions put in place",
    punishments_skipped => record_punishment_skipped: "sanctions not attempted",
    punishments_failed => record_punishment_failed: "sanctions that failed",
    punishments_degraded => record_punishment_degraded: "rollbacks that left a member degraded",
    notifications_delivered => record_notification_delivered: "log deliveries that succeeded",
    notifications_failed => record_notification_failed: "log deliveries that exhausted retries",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let metrics = DetectionMetrics::new();
        let clone = metrics.clone();
        metrics.record_event();
        clone.record_event();
        clone.record_denied();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.events, 2);
        assert_eq!(snapshot.denied, 1);
        assert_eq!(snapshot.admitted, 0);
    }
}
