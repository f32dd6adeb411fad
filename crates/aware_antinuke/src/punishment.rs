//! Punishment engine.

use crate::{Compensation, QuarantineSaga};
use aware_core::{GuildId, PunishmentConfig, PunishmentRecord, PunishmentType, RoleId, UserId};
use aware_error::{AntinukeError, AntinukeErrorKind};
use aware_interface::{ModerationActions, PolicyStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// How a punishment ended.
#[derive(Debug, Clone)]
pub enum PunishmentOutcome {
    /// The sanction is in place.
    Applied {
        /// Roles that could not be stripped during a quarantine.
        residual_roles: Vec<RoleId>,
    },
    /// The sanction was not attempted.
    Skipped(AntinukeError),
    /// The sanction failed before changing anything.
    Failed(AntinukeError),
    /// The quarantine role could not be added; removed roles were given back.
    RolledBack {
        /// Why the quarantine failed.
        error: AntinukeError,
        /// What the rollback achieved.
        compensation: Compensation,
    },
}

/// What the engine did for one denied user.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct PunishmentReport {
    /// Target and sanction.
    record: PunishmentRecord,
    /// How it ended.
    outcome: PunishmentOutcome,
}

impl PunishmentReport {
    /// Whether the sanction is in place.
    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, PunishmentOutcome::Applied { .. })
    }

    /// Whether an external call was made.
    pub fn was_attempted(&self) -> bool {
        !matches!(self.outcome, PunishmentOutcome::Skipped(_))
    }

    /// Whether the member was left with neither the sanction nor their roles.
    pub fn is_degraded(&self) -> bool {
        match &self.outcome {
            PunishmentOutcome::RolledBack { compensation, .. } => compensation.is_degraded(),
            _ => false,
        }
    }

    /// Error that stopped the sanction, if any.
    pub fn error(&self) -> Option<&AntinukeError> {
        match &self.outcome {
            PunishmentOutcome::Applied { .. } => None,
            PunishmentOutcome::Skipped(error) | PunishmentOutcome::Failed(error) => Some(error),
            PunishmentOutcome::RolledBack { error, .. } => Some(error),
        }
    }

    /// Punishment line for the moderation log.
    pub fn summary(&self) -> String {
        let punishment = self.record.punishment();
        match &self.outcome {
            PunishmentOutcome::Applied { residual_roles } if residual_roles.is_empty() => {
                punishment.to_string()
            }
            PunishmentOutcome::Applied { residual_roles } => format!(
                "{} ({} role(s) could not be removed)",
                punishment,
                residual_roles.len()
            ),
            PunishmentOutcome::Skipped(error) => {
                format!("{} (not applied: {})", punishment, error.kind)
            }
            PunishmentOutcome::Failed(error) => format!("{} (failed: {})", punishment, error.kind),
            PunishmentOutcome::RolledBack {
                error,
                compensation,
            } if compensation.is_degraded() => format!(
                "{} (failed: {}; rollback degraded, {} role(s) not restored)",
                punishment,
                error.kind,
                compensation.unrestored.len()
            ),
            PunishmentOutcome::RolledBack { error, .. } => {
                format!("{} (failed: {}; roles restored)", punishment, error.kind)
            }
        }
    }
}

/// Applies the configured sanction to a user who exceeded a threshold.
#[derive(Clone)]
pub struct PunishmentEngine {
    policies: Arc<dyn PolicyStore>,
    moderation: Arc<dyn ModerationActions>,
    config: PunishmentConfig,
}

impl PunishmentEngine {
    /// Engine over the policy store and moderation capability.
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        moderation: Arc<dyn ModerationActions>,
        config: PunishmentConfig,
    ) -> Self {
        Self {
            policies,
            moderation,
            config,
        }
    }

    /// Punishes `user` for `reason` according to the guild policy.
    ///
    /// Without a readable policy the sanction is quarantine, which then fails
    /// with `ConfigIncomplete` for lack of a quarantine role.
    #[instrument(skip(self), fields(guild = %guild, user = %user))]
    pub async fn apply(&self, guild: GuildId, user: UserId, reason: &str) -> PunishmentReport {
        let policy = match self.policies.get_policy(guild).await {
            Ok(policy) => policy,
            Err(e) => {
                warn!(error = %e, "Policy lookup failed, defaulting to quarantine");
                None
            }
        };
        let punishment = policy
            .as_ref()
            .map(|p| *p.punishment())
            .unwrap_or_default();
        let audit_reason = self.config.audit_reason(reason);
        let record = PunishmentRecord::new(guild, user, punishment, reason);

        let report = match punishment {
            PunishmentType::Ban => {
                self.single_call(record, "ban", self.moderation.ban(guild, user, &audit_reason).await)
            }
            PunishmentType::Kick => self.single_call(
                record,
                "kick",
                self.moderation.kick(guild, user, &audit_reason).await,
            ),
            PunishmentType::Quarantine => {
                let role = policy.as_ref().and_then(|p| *p.quarantine_role());
                self.quarantine(record, role, &audit_reason).await
            }
        };

        match &report.outcome {
            PunishmentOutcome::Applied { .. } => info!(%punishment, "Punishment applied"),
            outcome => warn!(%punishment, ?outcome, "Punishment not applied"),
        }
        report
    }

    fn single_call<T>(
        &self,
        record: PunishmentRecord,
        action: &str,
        result: aware_error::AwareResult<T>,
    ) -> PunishmentReport {
        let outcome = match result {
            Ok(_) => PunishmentOutcome::Applied {
                residual_roles: Vec::new(),
            },
            Err(e) => PunishmentOutcome::Failed(AntinukeError::external(action, e)),
        };
        PunishmentReport { record, outcome }
    }

    async fn quarantine(
        &self,
        record: PunishmentRecord,
        quarantine_role: Option<RoleId>,
        audit_reason: &str,
    ) -> PunishmentReport {
        let guild = *record.guild_id();
        let user = *record.user_id();

        let Some(quarantine_role) = quarantine_role else {
            return PunishmentReport {
                record,
                outcome: PunishmentOutcome::Skipped(AntinukeError::new(
                    AntinukeErrorKind::ConfigIncomplete("no quarantine role configured".to_string()),
                )),
            };
        };

        let prior_roles = match self.moderation.member_roles(guild, user).await {
            Ok(roles) => roles,
            Err(e) => {
                return PunishmentReport {
                    record,
                    outcome: PunishmentOutcome::Failed(AntinukeError::external("fetch member", e)),
                };
            }
        };
        let record = record.with_prior_roles(prior_roles.clone());

        let mut saga = QuarantineSaga::new();
        for role in prior_roles {
            match self
                .moderation
                .remove_role(guild, user, role, audit_reason)
                .await
            {
                Ok(()) => saga.role_removed(role),
                Err(e) => {
                    warn!(role = %role, error = %e, "Failed to remove role");
                    saga.removal_failed(role);
                }
            }
        }

        match self
            .moderation
            .add_role(guild, user, quarantine_role, audit_reason)
            .await
        {
            Ok(()) => PunishmentReport {
                record,
                outcome: PunishmentOutcome::Applied {
                    residual_roles: saga.failed_removals().to_vec(),
                },
            },
            Err(e) => {
                let error = AntinukeError::external("add quarantine role", e);
                warn!(error = %error, "Quarantine failed, restoring removed roles");
                let compensation = saga
                    .compensate(self.moderation.as_ref(), guild, user, audit_reason)
                    .await;
                PunishmentReport {
                    record,
                    outcome: PunishmentOutcome::RolledBack {
                        error,
                        compensation,
                    },
                }
            }
        }
    }
}
