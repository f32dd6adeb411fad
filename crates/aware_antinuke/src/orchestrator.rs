//! One pipeline run per administrative event.

use crate::{
    AttributionResolver, DetectionMetrics, DispatchHandle, ExemptionRegistry, Notification,
    NotificationDispatcher, PunishmentEngine, PunishmentOutcome, PunishmentReport,
};
use aware_core::{AdminEvent, AttributedEvent, AwareConfig};
use aware_error::AntinukeError;
use aware_interface::{
    AuditTrail, ExemptionStore, ModerationActions, NotificationTransport, PolicyStore,
};
use aware_rate_limit::{RateAccountant, Verdict};
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

/// External capabilities the pipeline runs against.
#[derive(Clone)]
pub struct Capabilities {
    /// Audit log reader.
    pub audit: Arc<dyn AuditTrail>,
    /// Guild policies.
    pub policies: Arc<dyn PolicyStore>,
    /// Whitelist.
    pub exemptions: Arc<dyn ExemptionStore>,
    /// Kick, ban and role calls.
    pub moderation: Arc<dyn ModerationActions>,
    /// Log delivery.
    pub transport: Arc<dyn NotificationTransport>,
}

/// How an event was handled.
#[derive(Debug)]
pub enum DetectionOutcome {
    /// Detection is switched off for the guild.
    Disabled,
    /// No actor could be found; the event was dropped.
    Unattributed(AntinukeError),
    /// The actor is whitelisted; only the detection log was sent.
    Exempt {
        /// The attributed event.
        event: AttributedEvent,
        /// Detection log delivery.
        deliveries: DispatchHandle,
    },
    /// Within thresholds; nothing else happens.
    Admitted {
        /// The attributed event.
        event: AttributedEvent,
    },
    /// Over a threshold; the actor was punished and both logs were sent.
    Punished {
        /// The attributed event.
        event: AttributedEvent,
        /// What the punishment engine did.
        report: PunishmentReport,
        /// Log deliveries.
        deliveries: DispatchHandle,
    },
}

/// Runs attribution, exemption, rate accounting, punishment and logging
/// for each inbound event.
///
/// Events are handled independently and concurrently; the only shared
/// mutable state is inside the [`RateAccountant`].
pub struct DetectionOrchestrator {
    policies: Arc<dyn PolicyStore>,
    attribution: AttributionResolver,
    exemptions: ExemptionRegistry,
    accountant: Arc<RateAccountant>,
    punishments: PunishmentEngine,
    dispatcher: NotificationDispatcher,
    metrics: DetectionMetrics,
}

impl DetectionOrchestrator {
    /// Pipeline on the system clock.
    pub fn new(capabilities: Capabilities, config: &AwareConfig) -> Self {
        let accountant = Arc::new(RateAccountant::new(Arc::clone(&capabilities.policies)));
        Self::with_accountant(capabilities, config, accountant)
    }

    /// Pipeline around an existing accountant.
    pub fn with_accountant(
        capabilities: Capabilities,
        config: &AwareConfig,
        accountant: Arc<RateAccountant>,
    ) -> Self {
        let Capabilities {
            audit,
            policies,
            exemptions,
            moderation,
            transport,
        } = capabilities;

        let metrics = DetectionMetrics::new();
        let exemptions = ExemptionRegistry::new(exemptions);
        let dispatcher =
            NotificationDispatcher::new(Arc::clone(&policies), exemptions.clone(), transport)
                .with_settings(config.notifications.clone())
                .with_embeds(config.embeds.clone())
                .with_metrics(metrics.clone());

        Self {
            attribution: AttributionResolver::new(audit),
            punishments: PunishmentEngine::new(
                Arc::clone(&policies),
                moderation,
                config.punishment.clone(),
            ),
            policies,
            exemptions,
            accountant,
            dispatcher,
            metrics,
        }
    }

    /// The shared rate accountant.
    pub fn accountant(&self) -> &Arc<RateAccountant> {
        &self.accountant
    }

    /// The whitelist.
    pub fn exemptions(&self) -> &ExemptionRegistry {
        &self.exemptions
    }

    /// Pipeline counters.
    pub fn metrics(&self) -> &DetectionMetrics {
        &self.metrics
    }

    /// Handles one event end to end.
    pub async fn handle(&self, event: AdminEvent) -> DetectionOutcome {
        let detection_id = Uuid::new_v4();
        let span = info_span!(
            "detection",
            %detection_id,
            guild = %event.guild_id,
            kind = %event.kind
        );
        self.run(event).instrument(span).await
    }

    async fn run(&self, event: AdminEvent) -> DetectionOutcome {
        self.metrics.record_event();

        let disabled = matches!(
            self.policies.get_policy(event.guild_id).await,
            Ok(Some(ref policy)) if !*policy.enabled()
        );
        if disabled {
            debug!("Detection disabled for guild");
            self.metrics.record_disabled();
            return DetectionOutcome::Disabled;
        }

        let attributed = match self.attribution.resolve(&event).await {
            Ok(attributed) => attributed,
            Err(e) => {
                debug!(error = %e, "Dropping unattributed event");
                self.metrics.record_unattributed();
                return DetectionOutcome::Unattributed(e);
            }
        };
        let (guild, actor) = (attributed.guild_id, attributed.actor);
        let kind = attributed.kind;

        if self.exemptions.is_exempt(guild, actor).await {
            debug!(actor = %actor, "Actor is whitelisted");
            self.metrics.record_exempt();
            let deliveries = self
                .dispatcher
                .notify(Notification::new(
                    guild,
                    actor,
                    kind.label(),
                    kind.detection_reason(),
                ))
                .await;
            return DetectionOutcome::Exempt {
                event: attributed,
                deliveries,
            };
        }

        if let Verdict::Admitted = self.accountant.record(guild, actor).await {
            self.metrics.record_admitted();
            return DetectionOutcome::Admitted { event: attributed };
        }

        self.metrics.record_denied();
        info!(actor = %actor, reason = kind.detection_reason(), "Threshold exceeded");

        let report = self
            .punishments
            .apply(guild, actor, kind.detection_reason())
            .await;
        match report.outcome() {
            PunishmentOutcome::Applied { .. } => self.metrics.record_punishment_applied(),
            PunishmentOutcome::Skipped(_) => self.metrics.record_punishment_skipped(),
            PunishmentOutcome::Failed(_) | PunishmentOutcome::RolledBack { .. } => {
                self.metrics.record_punishment_failed()
            }
        }
        if report.is_degraded() {
            self.metrics.record_punishment_degraded();
        }

        let deliveries = self
            .dispatcher
            .notify(
                Notification::new(guild, actor, kind.label(), kind.detection_reason())
                    .with_punishment(report.summary()),
            )
            .await;

        DetectionOutcome::Punished {
            event: attributed,
            report,
            deliveries,
        }
    }
}
