//! Log fan-out and delivery retries.


use antinuke_test_helpers::{
    ADMIN, ATTACKER, DETECTION_HOOK, GUILD, MODERATION_HOOK, RecordingTransport, configure,
};
use aware_antinuke::{
    DetectionMetrics, ExemptionRegistry, LogDestination, Notification, NotificationDispatcher,
};
use aware_core::{DETECTION_COLOR, GuildPolicy, MODERATION_COLOR, PunishmentType};
use aware_error::AntinukeErrorKind;
use aware_interface::{InMemoryExemptionStore, InMemoryPolicyStore, PolicyStore};
use std::sync::Arc;
use std::time::Duration;

struct Fixture {
    policies: Arc<InMemoryPolicyStore>,
    registry: ExemptionRegistry,
    transport: Arc<RecordingTransport>,
    metrics: DetectionMetrics,
    dispatcher: NotificationDispatcher,
}

fn fixture() -> Fixture {
    let policies = Arc::new(InMemoryPolicyStore::new());
    let registry = ExemptionRegistry::new(Arc::new(InMemoryExemptionStore::new()));
    let transport = Arc::new(RecordingTransport::default());
    let metrics = DetectionMetrics::new();
    let dispatcher =
        NotificationDispatcher::new(policies.clone(), registry.clone(), transport.clone())
            .with_metrics(metrics.clone());
    Fixture {
        policies,
        registry,
        transport,
        metrics,
        dispatcher,
    }
}

fn channel_deletion() -> Notification {
    Notification::new(
        GUILD,
        ATTACKER,
        "Channel Deletion",
        "Mass Channel Deletion Detected",
    )
}

#[tokio::test]
async fn test_both_logs_receive_embeds() {
    let f = fixture();
    configure(&f.policies, PunishmentType::Ban).await;

    let reports = f.dispatcher.notify(channel_deletion()).await.join().await;

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.result.is_ok() && r.attempts == 1));

    let detection = f.transport.delivered_to(DETECTION_HOOK);
    assert_eq!(detection.len(), 1);
    assert_eq!(detection[0].title(), "Anti-Nuke Detection");
    assert_eq!(*detection[0].color(), DETECTION_COLOR);
    assert_eq!(detection[0].footer(), "Server Secured by Aware");
    assert!(detection[0]
        .description()
        .contains("**Action:** Channel Deletion"));

    let moderation = f.transport.delivered_to(MODERATION_HOOK);
    assert_eq!(moderation.len(), 1);
    assert_eq!(moderation[0].title(), "Punishment Applied");
    assert_eq!(*moderation[0].color(), MODERATION_COLOR);
    assert_eq!(moderation[0].footer(), "Aware Moderation");
    assert!(moderation[0].description().contains("**Punishment:** ban"));

    assert_eq!(f.metrics.snapshot().notifications_delivered, 2);
}

#[tokio::test]
async fn test_punishment_override_reaches_moderation_log() {
    let f = fixture();
    configure(&f.policies, PunishmentType::Quarantine).await;

    f.dispatcher
        .notify(channel_deletion().with_punishment("quarantine (failed: nope; roles restored)"))
        .await
        .join()
        .await;

    let moderation = f.transport.delivered_to(MODERATION_HOOK);
    assert!(moderation[0]
        .description()
        .ends_with("**Punishment:** quarantine (failed: nope; roles restored)"));
}

#[tokio::test]
async fn test_exempt_actor_gets_annotated_detection_only() {
    let f = fixture();
    configure(&f.policies, PunishmentType::Ban).await;
    f.registry.grant(GUILD, ATTACKER, ADMIN).await.expect("grant");

    let reports = f.dispatcher.notify(channel_deletion()).await.join().await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].destination, LogDestination::Detection);
    assert!(f.transport.delivered_to(MODERATION_HOOK).is_empty());

    let detection = f.transport.delivered_to(DETECTION_HOOK);
    assert!(detection[0].description().ends_with(
        "**Reason:** Mass Channel Deletion Detected (Action allowed - User is whitelisted)"
    ));
}

#[tokio::test]
async fn test_missing_destination_is_skipped() {
    let f = fixture();
    let policy = GuildPolicy::new(GUILD).with_log_webhook(DETECTION_HOOK);
    f.policies.set_policy(&policy).await.expect("store policy");

    let handle = f.dispatcher.notify(channel_deletion()).await;
    assert_eq!(handle.len(), 1);
    handle.join().await;

    assert_eq!(f.transport.delivered_to(DETECTION_HOOK).len(), 1);
    assert_eq!(f.transport.total_delivered(), 1);
}

#[tokio::test]
async fn test_unconfigured_guild_schedules_nothing() {
    let f = fixture();

    let handle = f.dispatcher.notify(channel_deletion()).await;

    assert!(handle.is_empty());
    assert_eq!(f.transport.total_delivered(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_is_retried() {
    let f = fixture();
    configure(&f.policies, PunishmentType::Ban).await;
    f.transport.fail_next(DETECTION_HOOK, 2);

    let started = tokio::time::Instant::now();
    let reports = f.dispatcher.notify(channel_deletion()).await.join().await;

    let detection = reports
        .iter()
        .find(|r| r.destination == LogDestination::Detection)
        .expect("detection report");
    assert!(detection.result.is_ok());
    assert_eq!(detection.attempts, 3);
    assert_eq!(f.transport.attempts_to(DETECTION_HOOK), 3);
    assert!(started.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_destination_does_not_block_the_other() {
    let f = fixture();
    configure(&f.policies, PunishmentType::Ban).await;
    f.transport.fail_next(MODERATION_HOOK, 10);

    let reports = f.dispatcher.notify(channel_deletion()).await.join().await;

    let moderation = reports
        .iter()
        .find(|r| r.destination == LogDestination::Moderation)
        .expect("moderation report");
    assert_eq!(moderation.attempts, 3);
    match moderation.result.as_ref().map_err(|e| e.kind()) {
        Err(AntinukeErrorKind::NotificationFailed {
            destination,
            attempts,
            ..
        }) => {
            assert_eq!(destination, "moderation log");
            assert_eq!(*attempts, 3);
        }
        other => panic!("Expected NotificationFailed, got {:?}", other),
    }
    assert_eq!(f.transport.attempts_to(MODERATION_HOOK), 3);
    assert_eq!(f.transport.delivered_to(DETECTION_HOOK).len(), 1);

    let snapshot = f.metrics.snapshot();
    assert_eq!(snapshot.notifications_delivered, 1);
    assert_eq!(snapshot.notifications_failed, 1);
}
