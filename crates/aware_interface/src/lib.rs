//! Capability traits for the Aware anti-nuke engine.
//!
//! The detection pipeline only talks to the outside world through these
//! traits: the audit trail, the policy and exemption stores, moderation
//! actions, and the notification transport. In-memory stores are provided
//! for tests and for running without a database.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod traits;

pub use memory::{InMemoryExemptionStore, InMemoryPolicyStore};
pub use traits::{AuditTrail, ExemptionStore, ModerationActions, NotificationTransport, PolicyStore};
