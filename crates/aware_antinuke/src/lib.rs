//! Detection pipeline of the Aware anti-nuke engine.
//!
//! Every administrative event runs through the same stages:
//!
//! 1. [`AttributionResolver`] ties the event to the acting user via the audit log.
//! 2. [`ExemptionRegistry`] lets whitelisted users through with a detection log only.
//! 3. [`RateAccountant`](aware_rate_limit::RateAccountant) admits or denies the action.
//! 4. [`PunishmentEngine`] sanctions denied users, compensating failed quarantines.
//! 5. [`NotificationDispatcher`] posts detection and moderation logs with retry.
//!
//! [`DetectionOrchestrator`] wires the stages together; [`GuildPolicyManager`]
//! covers the configuration commands.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attribution;
mod exemption;
mod metrics;
mod notification;
mod orchestrator;
mod policy;
mod punishment;
mod saga;

pub use attribution::AttributionResolver;
pub use exemption::ExemptionRegistry;
pub use metrics::{DetectionMetrics, MetricsSnapshot};
pub use notification::{
    DeliveryReport, DispatchHandle, LogDestination, Notification, NotificationDispatcher,
};
pub use orchestrator::{Capabilities, DetectionOrchestrator, DetectionOutcome};
pub use policy::{GuildPolicyManager, LogSetup, PolicyStatus};
pub use punishment::{PunishmentEngine, PunishmentOutcome, PunishmentReport};
pub use saga::{CompensatingStep, Compensation, QuarantineSaga};
