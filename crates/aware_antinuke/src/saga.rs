//! Compensation for partially applied quarantines.

use aware_core::{GuildId, RoleId, UserId};
use aware_interface::ModerationActions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One undo action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompensatingStep {
    /// Give back a role that was taken away.
    RestoreRole(RoleId),
}

/// Result of running the compensating steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compensation {
    /// Roles successfully given back.
    pub restored: Vec<RoleId>,
    /// Roles that could not be given back.
    pub unrestored: Vec<RoleId>,
}

impl Compensation {
    /// The member did not end up with their original roles.
    pub fn is_degraded(&self) -> bool {
        !self.unrestored.is_empty()
    }
}

/// Tracks what a quarantine has changed so it can be undone.
///
/// Steps are recorded as roles are removed and replayed newest first.
#[derive(Debug, Clone, Default)]
pub struct QuarantineSaga {
    steps: Vec<CompensatingStep>,
    failed_removals: Vec<RoleId>,
}

impl QuarantineSaga {
    /// Empty saga.
    pub fn new() -> Self {
        Self::default()
    }

    /// A role was removed; restoring it undoes the change.
    pub fn role_removed(&mut self, role: RoleId) {
        self.steps.push(CompensatingStep::RestoreRole(role));
    }

    /// A role could not be removed and is still held.
    pub fn removal_failed(&mut self, role: RoleId) {
        self.failed_removals.push(role);
    }

    /// Pending undo steps, oldest first.
    pub fn steps(&self) -> &[CompensatingStep] {
        &self.steps
    }

    /// Roles the member still holds because removal failed.
    pub fn failed_removals(&self) -> &[RoleId] {
        &self.failed_removals
    }

    /// Runs every compensating step. Each is independent; a failure is
    /// logged and does not stop the rest.
    pub async fn compensate(
        self,
        moderation: &dyn ModerationActions,
        guild: GuildId,
        user: UserId,
        reason: &str,
    ) -> Compensation {
        let mut compensation = Compensation::default();

        for step in self.steps.into_iter().rev() {
            match step {
                CompensatingStep::RestoreRole(role) => {
                    match moderation.add_role(guild, user, role, reason).await {
                        Ok(()) => {
                            debug!(role = %role, "Role restored");
                            compensation.restored.push(role);
                        }
                        Err(e) => {
                            warn!(role = %role, error = %e, "Failed to restore role");
                            compensation.unrestored.push(role);
                        }
                    }
                }
            }
        }

        if compensation.is_degraded() {
            warn!(
                guild = %guild,
                user = %user,
                unrestored = compensation.unrestored.len(),
                "Quarantine rollback left member in a degraded state"
            );
        }
        compensation
    }
}
