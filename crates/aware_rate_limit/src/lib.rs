//! Per-user action-rate accounting.
//!
//! The [`RateAccountant`] keeps two fixed windows (60 s and 3600 s) of
//! admitted actions for every (guild, user) pair and decides whether the next
//! action is still within the guild's thresholds.
//!
//! # Example
//!
//! ```
//! use aware_core::{GuildId, UserId};
//! use aware_interface::InMemoryPolicyStore;
//! use aware_rate_limit::RateAccountant;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let accountant = RateAccountant::new(Arc::new(InMemoryPolicyStore::new()));
//! let (guild, user) = (GuildId::new(1), UserId::new(2));
//!
//! // No policy row: fallback of 2 per minute.
//! assert!(accountant.admit(guild, user).await);
//! assert!(accountant.admit(guild, user).await);
//! assert!(!accountant.admit(guild, user).await);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accountant;
mod clock;
mod window;

pub use accountant::{LimitSource, RateAccountant};
pub use clock::{Clock, MockClock, SystemClock};
pub use window::{ActionWindow, HOUR_WINDOW, MINUTE_WINDOW, Verdict};
