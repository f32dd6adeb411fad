//! Punishment engine and quarantine rollback.


use antinuke_test_helpers::{
    ATTACKER, GUILD, ModerationCall, QUARANTINE, ROLE_A, ROLE_B, RecordingModeration, configure,
};
use aware_antinuke::{PunishmentEngine, PunishmentOutcome};
use aware_core::{PunishmentConfig, PunishmentType};
use aware_error::AntinukeErrorKind;
use aware_interface::InMemoryPolicyStore;
use std::sync::Arc;

const REASON: &str = "Mass Channel Deletion Detected";

fn engine(
    policies: &Arc<InMemoryPolicyStore>,
    moderation: &Arc<RecordingModeration>,
) -> PunishmentEngine {
    PunishmentEngine::new(
        policies.clone(),
        moderation.clone(),
        PunishmentConfig::default(),
    )
}

#[tokio::test]
async fn test_ban_uses_prefixed_reason() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());
    configure(&policies, PunishmentType::Ban).await;

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    assert!(report.is_applied());
    assert_eq!(report.summary(), "ban");
    assert_eq!(
        moderation.calls(),
        vec![ModerationCall::Ban {
            user: ATTACKER,
            reason: format!("Server Secured by Aware | {}", REASON),
        }]
    );
}

#[tokio::test]
async fn test_failed_kick_is_reported() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());
    configure(&policies, PunishmentType::Kick).await;
    moderation.fail_sanctions();

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    assert!(!report.is_applied());
    assert!(report.was_attempted());
    match report.error().map(|e| e.kind()) {
        Some(AntinukeErrorKind::ExternalActionFailed { action, .. }) => assert_eq!(action, "kick"),
        other => panic!("Expected ExternalActionFailed, got {:?}", other),
    }
    assert!(report.summary().starts_with("kick (failed:"));
}

#[tokio::test]
async fn test_quarantine_without_role_is_skipped() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());
    // Default policy: quarantine with no role configured.
    aware_interface::PolicyStore::ensure_default(policies.as_ref(), GUILD)
        .await
        .expect("default policy");

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    assert!(!report.was_attempted());
    assert!(matches!(
        report.error().map(|e| e.kind()),
        Some(AntinukeErrorKind::ConfigIncomplete(_))
    ));
    assert!(moderation.calls().is_empty());
}

#[tokio::test]
async fn test_missing_policy_defaults_to_quarantine() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    assert_eq!(*report.record().punishment(), PunishmentType::Quarantine);
    assert!(matches!(report.outcome(), PunishmentOutcome::Skipped(_)));
}

#[tokio::test]
async fn test_quarantine_swaps_roles() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());
    configure(&policies, PunishmentType::Quarantine).await;
    moderation.give_roles(ATTACKER, &[ROLE_A, ROLE_B]);

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    assert!(report.is_applied());
    assert_eq!(report.record().prior_roles(), &vec![ROLE_A, ROLE_B]);
    assert_eq!(moderation.roles_of(ATTACKER), vec![QUARANTINE]);
    assert_eq!(
        moderation.calls(),
        vec![
            ModerationCall::RemoveRole(ROLE_A),
            ModerationCall::RemoveRole(ROLE_B),
            ModerationCall::AddRole(QUARANTINE),
        ]
    );
}

#[tokio::test]
async fn test_quarantine_keeps_going_past_stuck_role() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());
    configure(&policies, PunishmentType::Quarantine).await;
    moderation.give_roles(ATTACKER, &[ROLE_A, ROLE_B]);
    moderation.fail_removing(ROLE_A);

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    match report.outcome() {
        PunishmentOutcome::Applied { residual_roles } => assert_eq!(residual_roles, &vec![ROLE_A]),
        other => panic!("Expected Applied, got {:?}", other),
    }
    assert_eq!(moderation.roles_of(ATTACKER), vec![ROLE_A, QUARANTINE]);
    assert!(report.summary().contains("1 role(s) could not be removed"));
}

#[tokio::test]
async fn test_failed_quarantine_restores_removed_roles() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());
    configure(&policies, PunishmentType::Quarantine).await;
    moderation.give_roles(ATTACKER, &[ROLE_A, ROLE_B]);
    moderation.fail_adding(QUARANTINE);

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    match report.outcome() {
        PunishmentOutcome::RolledBack { compensation, .. } => {
            assert_eq!(compensation.restored, vec![ROLE_B, ROLE_A]);
            assert!(compensation.unrestored.is_empty());
        }
        other => panic!("Expected RolledBack, got {:?}", other),
    }
    assert!(!report.is_degraded());
    assert!(report.summary().ends_with("roles restored)"));

    let mut held = moderation.roles_of(ATTACKER);
    held.sort();
    assert_eq!(held, vec![ROLE_A, ROLE_B]);
}

#[tokio::test]
async fn test_rollback_failure_is_degraded() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());
    configure(&policies, PunishmentType::Quarantine).await;
    moderation.give_roles(ATTACKER, &[ROLE_A, ROLE_B]);
    moderation.fail_adding(QUARANTINE);
    moderation.fail_adding(ROLE_A);

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    assert!(report.is_degraded());
    match report.outcome() {
        PunishmentOutcome::RolledBack { compensation, .. } => {
            assert_eq!(compensation.restored, vec![ROLE_B]);
            assert_eq!(compensation.unrestored, vec![ROLE_A]);
        }
        other => panic!("Expected RolledBack, got {:?}", other),
    }
    assert!(report.summary().contains("rollback degraded"));
}

#[tokio::test]
async fn test_member_lookup_failure_changes_nothing() {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let moderation = Arc::new(RecordingModeration::default());
    configure(&policies, PunishmentType::Quarantine).await;
    moderation.fail_member_lookup();

    let report = engine(&policies, &moderation).apply(GUILD, ATTACKER, REASON).await;

    assert!(matches!(report.outcome(), PunishmentOutcome::Failed(_)));
    assert!(moderation.calls().is_empty());
}
