// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friends roster refresh behavior with stub platform collaborators.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tree_quest::models::Friend;
use tree_quest::services::{FileRosterLoader, FriendsRoster, RefreshOutcome, RosterLoader};

/// Loader that succeeds or fails on demand and counts calls.
#[derive(Default)]
struct StubLoader {
    fail: AtomicBool,
    calls: AtomicUsize,
}

#[async_trait]
impl RosterLoader for StubLoader {
    async fn load_friends(&self) -> anyhow::Result<Vec<Friend>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("Game Center unavailable");
        }
        Ok(vec![
            Friend::from_player("p1", "Astrid"),
            Friend::from_player("p2", "Nils"),
            Friend::from_player("p3", "Greta"),
            Friend::from_player("p4", "Olle"),
        ])
    }
}

/// Loader that blocks until released.
struct GatedLoader {
    started: Notify,
    release: Notify,
}

#[async_trait]
impl RosterLoader for GatedLoader {
    async fn load_friends(&self) -> anyhow::Result<Vec<Friend>> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(vec![Friend::from_player("p1", "Astrid")])
    }
}

/// Loader that never finishes.
struct StalledLoader;

#[async_trait]
impl RosterLoader for StalledLoader {
    async fn load_friends(&self) -> anyhow::Result<Vec<Friend>> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_refresh_populates_friends() {
    let roster = FriendsRoster::new(Arc::new(|| true), Arc::new(StubLoader::default()));

    assert_eq!(roster.refresh().await, RefreshOutcome::Loaded(4));
    assert_eq!(roster.friends().len(), 4);
    assert!(roster.is_authenticated());
    assert!(!roster.is_loading());
    assert!(roster.last_error().is_none());

    let first = roster.friends()[0].clone();
    assert_eq!(roster.friend(&first.id).unwrap().display_name, first.display_name);
}

#[tokio::test]
async fn test_loader_failure_clears_and_records_error() {
    let loader = Arc::new(StubLoader::default());
    let roster = FriendsRoster::new(Arc::new(|| true), loader.clone());
    roster.refresh().await;
    assert_eq!(roster.friends().len(), 4);

    loader.fail.store(true, Ordering::SeqCst);
    assert_eq!(roster.refresh().await, RefreshOutcome::Failed);

    assert!(roster.friends().is_empty());
    assert!(roster.is_authenticated());
    assert_eq!(roster.last_error().as_deref(), Some("Game Center unavailable"));

    loader.fail.store(false, Ordering::SeqCst);
    roster.refresh().await;
    assert!(roster.last_error().is_none());
}

#[tokio::test]
async fn test_unauthenticated_refresh_skips_loader() {
    let signed_in = Arc::new(AtomicBool::new(true));
    let loader = Arc::new(StubLoader::default());
    let flag = signed_in.clone();
    let roster = FriendsRoster::new(
        Arc::new(move || flag.load(Ordering::SeqCst)),
        loader.clone(),
    );
    roster.refresh().await;

    signed_in.store(false, Ordering::SeqCst);
    assert_eq!(roster.refresh().await, RefreshOutcome::Unauthenticated);

    assert!(!roster.is_authenticated());
    assert!(roster.friends().is_empty());
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_overlapping_refresh_is_ignored() {
    let loader = Arc::new(GatedLoader {
        started: Notify::new(),
        release: Notify::new(),
    });
    let roster = Arc::new(FriendsRoster::new(Arc::new(|| true), loader.clone()));

    let first = {
        let roster = roster.clone();
        tokio::spawn(async move { roster.refresh().await })
    };
    loader.started.notified().await;
    assert!(roster.is_loading());

    assert_eq!(roster.refresh().await, RefreshOutcome::AlreadyInFlight);

    loader.release.notify_one();
    assert_eq!(first.await.unwrap(), RefreshOutcome::Loaded(1));
    assert!(!roster.is_loading());

    // The guard is released once the first refresh finishes
    let again = tokio::spawn({
        let roster = roster.clone();
        async move { roster.refresh().await }
    });
    loader.started.notified().await;
    loader.release.notify_one();
    assert_eq!(again.await.unwrap(), RefreshOutcome::Loaded(1));
}

#[tokio::test]
async fn test_cancelled_refresh_clears_loading() {
    let roster = FriendsRoster::new(Arc::new(|| true), Arc::new(StalledLoader));

    let timed_out = tokio::time::timeout(Duration::from_millis(10), roster.refresh()).await;
    assert!(timed_out.is_err());

    assert!(!roster.is_loading());
    assert!(roster.friends().is_empty());

    // The in-flight guard went away with the dropped future
    let retry = tokio::time::timeout(Duration::from_millis(10), roster.refresh()).await;
    assert!(retry.is_err(), "second refresh should reach the loader again");
    assert!(!roster.is_loading());
}

#[tokio::test]
async fn test_file_loader_reads_exported_roster() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");
    let friends = vec![Friend::from_player("p1", "Astrid")];
    std::fs::write(&path, serde_json::to_vec(&friends).unwrap()).unwrap();

    let roster = FriendsRoster::new(Arc::new(|| true), Arc::new(FileRosterLoader::new(path)));
    assert_eq!(roster.refresh().await, RefreshOutcome::Loaded(1));
    assert_eq!(roster.friend("p1").unwrap(), friends[0]);
}
