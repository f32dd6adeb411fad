//! Detection and moderation log delivery.

use crate::{DetectionMetrics, ExemptionRegistry};
use aware_core::{
    EmbedConfig, GuildId, LogEmbed, NotificationConfig, UserId, WHITELISTED_ANNOTATION,
};
use aware_error::{AntinukeError, AntinukeErrorKind, AntinukeResult};
use aware_interface::{NotificationTransport, PolicyStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::task::JoinHandle;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{Instrument, debug, error, info_span, instrument, warn};

/// Which log a delivery targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum LogDestination {
    /// "Anti-Nuke Detection" entries.
    #[strum(serialize = "detection log")]
    Detection,
    /// "Punishment Applied" entries.
    #[strum(serialize = "moderation log")]
    Moderation,
}

/// One detection to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Guild the action happened in.
    pub guild_id: GuildId,
    /// Acting user.
    pub user_id: UserId,
    /// Action label, e.g. "Channel Deletion".
    pub action: String,
    /// Violation, e.g. "Mass Channel Deletion Detected".
    pub reason: String,
    /// Punishment line for the moderation log; the policy's type when unset.
    pub punishment: Option<String>,
}

impl Notification {
    /// Notification carrying the policy's punishment type.
    pub fn new(
        guild_id: GuildId,
        user_id: UserId,
        action: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            guild_id,
            user_id,
            action: action.into(),
            reason: reason.into(),
            punishment: None,
        }
    }

    /// Overrides the punishment line.
    pub fn with_punishment(mut self, punishment: impl Into<String>) -> Self {
        self.punishment = Some(punishment.into());
        self
    }
}

/// Final state of one destination's delivery.
#[derive(Debug, Clone)]
pub struct DeliveryReport {
    /// Target log.
    pub destination: LogDestination,
    /// Attempts made, first try included.
    pub attempts: u32,
    /// `NotificationFailed` once attempts are exhausted.
    pub result: AntinukeResult<()>,
}

/// Deliveries scheduled by one `notify` call.
///
/// Dropping the handle leaves the deliveries running.
#[derive(Debug, Default)]
pub struct DispatchHandle {
    deliveries: Vec<JoinHandle<DeliveryReport>>,
}

impl DispatchHandle {
    /// Number of scheduled deliveries.
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Waits for every delivery to finish.
    pub async fn join(self) -> Vec<DeliveryReport> {
        futures::future::join_all(self.deliveries)
            .await
            .into_iter()
            .filter_map(|joined| joined.ok())
            .collect()
    }
}

/// Fans detections out to the detection and moderation logs.
///
/// Each destination is delivered on its own task with a fixed pause between
/// attempts; the caller never waits on delivery.
#[derive(Clone)]
pub struct NotificationDispatcher {
    policies: Arc<dyn PolicyStore>,
    exemptions: ExemptionRegistry,
    transport: Arc<dyn NotificationTransport>,
    settings: NotificationConfig,
    embeds: EmbedConfig,
    metrics: DetectionMetrics,
}

impl NotificationDispatcher {
    /// Dispatcher with default delivery settings and footers.
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        exemptions: ExemptionRegistry,
        transport: Arc<dyn NotificationTransport>,
    ) -> Self {
        Self {
            policies,
            exemptions,
            transport,
            settings: NotificationConfig::default(),
            embeds: EmbedConfig::default(),
            metrics: DetectionMetrics::default(),
        }
    }

    /// Overrides attempts and delay.
    pub fn with_settings(mut self, settings: NotificationConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Overrides embed footers.
    pub fn with_embeds(mut self, embeds: EmbedConfig) -> Self {
        self.embeds = embeds;
        self
    }

    /// Records delivery outcomes into shared counters.
    pub fn with_metrics(mut self, metrics: DetectionMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Schedules delivery to both logs.
    ///
    /// Exempt users get the whitelisted annotation and no moderation log.
    /// A missing destination is skipped with a warning.
    #[instrument(skip(self, notification), fields(guild = %notification.guild_id, user = %notification.user_id))]
    pub async fn notify(&self, notification: Notification) -> DispatchHandle {
        let Notification {
            guild_id,
            user_id,
            action,
            mut reason,
            punishment,
        } = notification;

        let exempt = self.exemptions.is_exempt(guild_id, user_id).await;
        if exempt {
            reason.push_str(WHITELISTED_ANNOTATION);
        }

        let policy = match self.policies.get_policy(guild_id).await {
            Ok(Some(policy)) => policy,
            Ok(None) => {
                warn!("No log destinations configured");
                return DispatchHandle::default();
            }
            Err(e) => {
                warn!(error = %e, "Policy lookup failed, dropping notification");
                return DispatchHandle::default();
            }
        };

        let mut handle = DispatchHandle::default();

        match policy.log_webhook() {
            Some(url) => {
                let embed = LogEmbed::detection(
                    user_id,
                    &action,
                    &reason,
                    &self.embeds.detection_footer,
                );
                handle
                    .deliveries
                    .push(self.spawn_delivery(LogDestination::Detection, url.clone(), embed));
            }
            None => warn!(destination = %LogDestination::Detection, "Destination not configured"),
        }

        if exempt {
            debug!("Actor is whitelisted, moderation log suppressed");
            return handle;
        }

        match policy.mod_log_webhook() {
            Some(url) => {
                let punishment = punishment.unwrap_or_else(|| policy.punishment().to_string());
                let embed = LogEmbed::punishment(
                    user_id,
                    &reason,
                    &punishment,
                    &self.embeds.moderation_footer,
                );
                handle
                    .deliveries
                    .push(self.spawn_delivery(LogDestination::Moderation, url.clone(), embed));
            }
            None => warn!(destination = %LogDestination::Moderation, "Destination not configured"),
        }

        handle
    }

    fn spawn_delivery(
        &self,
        destination: LogDestination,
        url: String,
        embed: LogEmbed,
    ) -> JoinHandle<DeliveryReport> {
        let transport = Arc::clone(&self.transport);
        let metrics = self.metrics.clone();
        let max_attempts = self.settings.max_attempts.max(1);
        let strategy = FixedInterval::new(self.settings.retry_delay())
            .take(max_attempts.saturating_sub(1) as usize);
        let span = info_span!("delivery", %destination);

        tokio::spawn(
            async move {
                let attempts = Arc::new(AtomicU32::new(0));

                let result = Retry::spawn(strategy, || {
                    let transport = Arc::clone(&transport);
                    let attempts = Arc::clone(&attempts);
                    let url = url.clone();
                    let embed = embed.clone();
                    async move {
                        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                        transport.send_embed(&url, &embed).await.map_err(|e| {
                            warn!(attempt, error = %e, "Log delivery failed");
                            RetryError::Transient {
                                err: e,
                                retry_after: None,
                            }
                        })
                    }
                })
                .await;

                let attempts = attempts.load(Ordering::SeqCst);
                let result = match result {
                    Ok(()) => {
                        debug!(attempts, "Log delivered");
                        metrics.record_notification_delivered();
                        Ok(())
                    }
                    Err(e) => {
                        error!(attempts, error = %e, "Log delivery abandoned");
                        metrics.record_notification_failed();
                        Err(AntinukeError::new(AntinukeErrorKind::NotificationFailed {
                            destination: destination.to_string(),
                            attempts,
                            reason: e.to_string(),
                        }))
                    }
                };

                DeliveryReport {
                    destination,
                    attempts,
                    result,
                }
            }
            .instrument(span),
        )
    }
}
