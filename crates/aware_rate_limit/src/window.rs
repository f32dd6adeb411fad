//! Fixed two-window action counters.

use aware_core::ActionLimits;
use std::time::{Duration, Instant};

/// Length of the short window.
pub const MINUTE_WINDOW: Duration = Duration::from_secs(60);
/// Length of the long window.
pub const HOUR_WINDOW: Duration = Duration::from_secs(3600);

/// Outcome of recording one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Within both thresholds; counted.
    Admitted,
    /// A threshold was already reached; not counted.
    Denied {
        /// Actions counted in the current minute window.
        minute_count: u32,
        /// Actions counted in the current hour window.
        hour_count: u32,
    },
}

impl Verdict {
    /// Whether the action was admitted.
    pub fn is_admitted(self) -> bool {
        matches!(self, Verdict::Admitted)
    }
}

/// Admitted-action counters for one (guild, user) pair.
///
/// Windows are fixed, not sliding: each resets once its full length has
/// elapsed since it started, so a burst straddling a reset is only partly seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionWindow {
    minute_count: u32,
    hour_count: u32,
    minute_start: Instant,
    hour_start: Instant,
}

impl ActionWindow {
    /// Empty window pair starting at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            minute_count: 0,
            hour_count: 0,
            minute_start: now,
            hour_start: now,
        }
    }

    /// Actions counted in the current minute window.
    pub fn minute_count(&self) -> u32 {
        self.minute_count
    }

    /// Actions counted in the current hour window.
    pub fn hour_count(&self) -> u32 {
        self.hour_count
    }

    fn roll(&mut self, now: Instant) {
        if now.saturating_duration_since(self.minute_start) >= MINUTE_WINDOW {
            self.minute_count = 0;
            self.minute_start = now;
        }
        if now.saturating_duration_since(self.hour_start) >= HOUR_WINDOW {
            self.hour_count = 0;
            self.hour_start = now;
        }
    }

    /// Resets elapsed windows, then counts the action if both thresholds allow.
    ///
    /// A denied action leaves the counters untouched.
    pub fn record(&mut self, now: Instant, limits: ActionLimits) -> Verdict {
        self.roll(now);

        if self.minute_count >= limits.per_minute() || self.hour_count >= limits.per_hour() {
            return Verdict::Denied {
                minute_count: self.minute_count,
                hour_count: self.hour_count,
            };
        }

        self.minute_count += 1;
        self.hour_count += 1;
        Verdict::Admitted
    }

    /// Both windows have elapsed; the next `record` would start from zero.
    pub fn is_stale(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.minute_start) >= MINUTE_WINDOW
            && now.saturating_duration_since(self.hour_start) >= HOUR_WINDOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ActionLimits {
        ActionLimits::new(2, 3).expect("valid limits")
    }

    #[test]
    fn test_denied_action_is_not_counted() {
        let start = Instant::now();
        let mut window = ActionWindow::new(start);
        assert!(window.record(start, limits()).is_admitted());
        assert!(window.record(start, limits()).is_admitted());
        for _ in 0..5 {
            assert_eq!(
                window.record(start, limits()),
                Verdict::Denied {
                    minute_count: 2,
                    hour_count: 2
                }
            );
        }
        assert_eq!(window.minute_count(), 2);
    }

    #[test]
    fn test_hour_limit_denies_across_minutes() {
        let start = Instant::now();
        let mut window = ActionWindow::new(start);
        assert!(window.record(start, limits()).is_admitted());
        assert!(window.record(start + MINUTE_WINDOW, limits()).is_admitted());
        assert!(window.record(start + MINUTE_WINDOW * 2, limits()).is_admitted());
        assert!(!window.record(start + MINUTE_WINDOW * 3, limits()).is_admitted());
        assert!(window.record(start + HOUR_WINDOW, limits()).is_admitted());
    }

    #[test]
    fn test_staleness_needs_both_windows() {
        let start = Instant::now();
        let window = ActionWindow::new(start);
        assert!(!window.is_stale(start + MINUTE_WINDOW));
        assert!(window.is_stale(start + HOUR_WINDOW));
    }
}
