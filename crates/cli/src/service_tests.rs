// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use uc_core::{Language, ManualClock, Theme};

use super::*;
use crate::store::MemoryStore;
use crate::session::LAST_SYNC_KEY;
use crate::sync::test_helpers::{path, FlakyStore, MockRemote};
use crate::sync::ConnectivityState;

fn service(connected: bool) -> (Arc<MockRemote>, Arc<OfflineService>) {
    let remote = MockRemote::new();
    let monitor = ConnectivityMonitor::new(ConnectivityState { connected });
    let service = OfflineService::with_clock(
        Arc::new(MemoryStore::new()),
        remote.clone(),
        monitor,
        Arc::new(ManualClock::new(10_000)),
    );
    (remote, Arc::new(service))
}

#[tokio::test]
async fn online_write_is_applied() {
    let (remote, service) = service(true);
    let outcome = service.write(path("a/b"), json!(1)).await.unwrap();

    assert_eq!(outcome, WriteOutcome::Applied);
    assert_eq!(remote.writes(), vec![(path("a/b"), json!(1))]);
    assert!(service.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn offline_write_is_queued_without_remote_attempt() {
    let (remote, service) = service(false);
    let outcome = service.write(path("a"), json!("x")).await.unwrap();

    let WriteOutcome::Queued(write) = outcome else {
        panic!("expected queued write");
    };
    assert_eq!(write.path, path("a"));
    assert!(remote.writes().is_empty());
    assert_eq!(service.pending().await.unwrap(), vec![write]);
}

#[tokio::test]
async fn failed_online_write_falls_back_to_queue() {
    let (remote, service) = service(true);
    remote.fail_path("a");

    let outcome = service.write(path("a"), json!(1)).await.unwrap();
    assert!(matches!(outcome, WriteOutcome::Queued(_)));
    assert_eq!(service.pending().await.unwrap().len(), 1);
}

#[tokio::test]
async fn complete_sync_records_last_sync() {
    let (_, service) = service(false);
    service.write(path("a"), json!(1)).await.unwrap();
    assert_eq!(service.last_sync().await.unwrap(), None);

    let report = service.sync_now().await.unwrap();
    assert_eq!(report.outcome(), SyncOutcome::Complete);
    assert_eq!(service.last_sync().await.unwrap(), Some(10_000));
}

#[tokio::test]
async fn partial_sync_does_not_record_last_sync() {
    let (remote, service) = service(false);
    service.write(path("a"), json!(1)).await.unwrap();
    service.write(path("b"), json!(2)).await.unwrap();
    remote.fail_path("a");

    let report = service.sync_now().await.unwrap();
    assert_eq!(report.outcome(), SyncOutcome::Partial);
    assert_eq!(service.last_sync().await.unwrap(), None);
}

#[tokio::test]
async fn reconnect_loop_syncs_on_online_transition() {
    let (remote, service) = service(false);
    service
        .write(path("users/42/preferences"), json!({"theme": "dark"}))
        .await
        .unwrap();

    let cancel = CancellationToken::new();
    let runner = {
        let service = service.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { service.run_until_cancelled(cancel).await })
    };

    // Wait for the loop to subscribe before going online
    while service.monitor().subscriber_count() == 0 {
        tokio::task::yield_now().await;
    }
    service.monitor().report(true);

    tokio::time::timeout(Duration::from_secs(5), async {
        while !service.pending().await.unwrap().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    assert_eq!(
        remote.writes(),
        vec![(path("users/42/preferences"), json!({"theme": "dark"}))]
    );

    cancel.cancel();
    runner.await.unwrap();
    assert_eq!(service.monitor().subscriber_count(), 0);
}

#[tokio::test]
async fn forget_and_discard() {
    let (_, service) = service(false);
    service.write(path("a"), json!(1)).await.unwrap();
    service.write(path("b"), json!(2)).await.unwrap();
    service.write(path("c"), json!(3)).await.unwrap();

    service.forget(&path("b")).await.unwrap();
    let err = service.forget(&path("b")).await.unwrap_err();
    assert!(matches!(err, Error::NotPending(_)));

    assert_eq!(service.discard().await.unwrap(), 2);
    assert!(service.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_offline_does_not_sync() {
    let (remote, service) = service(false);
    service.write(path("a"), json!(1)).await.unwrap();

    let login = service.login("user-1").await.unwrap();
    assert_eq!(login.marker.user_id, "user-1");
    assert!(login.sync.is_none());
    assert!(remote.writes().is_empty());
    assert_eq!(
        service.current_user().await.unwrap().map(|m| m.user_id),
        Some("user-1".to_string())
    );
}

#[tokio::test]
async fn login_online_syncs_pending() {
    let (remote, service) = service(false);
    service.write(path("a"), json!(1)).await.unwrap();
    service.monitor().report(true);

    let login = service.login("user-1").await.unwrap();
    assert_eq!(login.sync.map(|r| r.synced), Some(1));
    assert_eq!(remote.writes().len(), 1);
}

#[tokio::test]
async fn login_rejects_multi_segment_id() {
    let (_, service) = service(false);
    assert!(service.login("a/b").await.is_err());
    assert!(service.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn logout_clears_session_prefs_and_queue() {
    let (_, service) = service(false);
    service.login("u").await.unwrap();
    service
        .update_preferences(Some(Theme::Dark), None)
        .await
        .unwrap();

    let dropped = service.logout(false).await.unwrap();
    assert_eq!(dropped, 1);
    assert!(service.current_user().await.unwrap().is_none());
    assert_eq!(service.preferences().await.unwrap(), Preferences::default());
    assert!(service.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn logout_can_keep_pending() {
    let (_, service) = service(false);
    service.login("u").await.unwrap();
    service.write(path("a"), json!(1)).await.unwrap();

    assert_eq!(service.logout(true).await.unwrap(), 0);
    assert_eq!(service.pending().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_preferences_requires_login() {
    let (_, service) = service(false);
    let err = service
        .update_preferences(Some(Theme::Dark), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotLoggedIn));
}

#[tokio::test]
async fn update_preferences_offline_queues_user_path() {
    let (_, service) = service(false);
    service.login("42").await.unwrap();

    let (prefs, outcome) = service
        .update_preferences(Some(Theme::Dark), Some(Language::Ru))
        .await
        .unwrap();
    assert_eq!(prefs.theme, Theme::Dark);
    assert_eq!(prefs.language, Language::Ru);

    let WriteOutcome::Queued(write) = outcome else {
        panic!("expected queued write");
    };
    assert_eq!(write.path, path("users/42/preferences"));
    assert_eq!(write.data, json!({"theme": "dark", "language": "ru"}));

    // Unchanged fields keep their cached value
    let (prefs, _) = service
        .update_preferences(None, Some(Language::Kk))
        .await
        .unwrap();
    assert_eq!(prefs.theme, Theme::Dark);
    assert_eq!(service.pending().await.unwrap().len(), 1);
}

#[test]
fn preferences_path_shape() {
    assert_eq!(
        preferences_path("42").unwrap().as_str(),
        "users/42/preferences"
    );
    assert!(preferences_path("").is_err());
    assert!(preferences_path("a/b").is_err());
    assert!(preferences_path("a.b").is_err());
}

#[tokio::test]
async fn sync_report_kept_when_last_sync_cannot_be_recorded() {
    let store = FlakyStore::new();
    store.fail_key(LAST_SYNC_KEY);
    let remote = MockRemote::new();
    let service = OfflineService::new(
        store,
        remote.clone(),
        ConnectivityMonitor::new(ConnectivityState { connected: false }),
    );
    service.write(path("a"), json!(1)).await.unwrap();

    let report = service.sync_now().await.unwrap();
    assert_eq!(report.outcome(), SyncOutcome::Complete);
    assert_eq!(report.synced, 1);
    assert!(service.pending().await.unwrap().is_empty());
    assert_eq!(service.last_sync().await.unwrap(), None);
}
