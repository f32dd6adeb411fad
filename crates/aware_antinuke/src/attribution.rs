//! Attribution of events to the acting user.

use aware_core::{AdminEvent, AttributedEvent};
use aware_error::{AntinukeError, AntinukeErrorKind, AntinukeResult};
use aware_interface::AuditTrail;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Looks up who performed an event.
///
/// The audit log is eventually consistent: the most recent entry of the
/// matching type is taken as the actor. No retry is attempted.
#[derive(Clone)]
pub struct AttributionResolver {
    audit: Arc<dyn AuditTrail>,
}

impl AttributionResolver {
    /// Resolver over an audit trail.
    pub fn new(audit: Arc<dyn AuditTrail>) -> Self {
        Self { audit }
    }

    /// Binds the event to its actor.
    ///
    /// # Errors
    ///
    /// `AttributionUnavailable` when the audit log has no matching entry or
    /// cannot be read.
    #[instrument(skip(self, event), fields(guild = %event.guild_id, kind = %event.kind))]
    pub async fn resolve(&self, event: &AdminEvent) -> AntinukeResult<AttributedEvent> {
        let action = event.kind.audit_action();

        match self.audit.latest_actor(event.guild_id, action).await {
            Ok(Some(actor)) => {
                debug!(actor = %actor, "Event attributed");
                Ok(event.attribute(actor))
            }
            Ok(None) => Err(AntinukeError::new(
                AntinukeErrorKind::AttributionUnavailable(format!(
                    "no {} entry in audit log",
                    action
                )),
            )),
            Err(e) => Err(AntinukeError::new(
                AntinukeErrorKind::AttributionUnavailable(format!(
                    "audit log query for {} failed: {}",
                    action, e
                )),
            )),
        }
    }
}
