// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marker store: the single source of truth for discovered trees.
//!
//! Mutators take `&mut self`, so there is exactly one owner at a time. Every
//! mutation notifies subscribers and hands a snapshot to the write-behind
//! worker without waiting for the file write.

use crate::error::{AppError, Result};
use crate::models::{Coordinate, TreeMarker};
use crate::services::persistence::{MarkerFile, Snapshot, WriteBehind, WriteLock};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// In-memory marker list backed by `tree_markers.json`.
#[derive(Debug)]
pub struct MarkerStore {
    /// Newest first
    markers: Vec<TreeMarker>,
    file: MarkerFile,
    write_lock: WriteLock,
    /// `None` when scheduled persists are disabled
    write_behind: Option<WriteBehind>,
    changes: watch::Sender<Snapshot>,
}

impl MarkerStore {
    /// Create a store that persists every mutation in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(file: MarkerFile) -> Self {
        let write_lock = WriteLock::default();
        let write_behind = WriteBehind::spawn(file.clone(), write_lock.clone());
        Self::build(file, write_lock, Some(write_behind))
    }

    /// Create a store whose mutations never schedule a write.
    ///
    /// `persist` still writes when called directly.
    pub fn without_persistence(file: MarkerFile) -> Self {
        Self::build(file, WriteLock::default(), None)
    }

    fn build(file: MarkerFile, write_lock: WriteLock, write_behind: Option<WriteBehind>) -> Self {
        let (changes, _) = watch::channel(Arc::from(Vec::new()));
        Self {
            markers: Vec::new(),
            file,
            write_lock,
            write_behind,
            changes,
        }
    }

    /// Replace the in-memory list with the persisted one, newest first.
    ///
    /// Any failure other than a missing file is logged and leaves the store
    /// empty.
    pub async fn load(&mut self) {
        let loaded = match self.file.read_async().await {
            Ok(markers) => markers,
            Err(e) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %e,
                    "Could not load stored markers, starting empty"
                );
                Vec::new()
            }
        };

        let mut markers = dedup_by_id(loaded);
        markers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tracing::info!(count = markers.len(), "Loaded markers");

        self.markers = markers;
        self.notify();
    }

    /// Record a new marker at the front of the list.
    ///
    /// The note is stored as given; trimming is the caller's job. Coordinates
    /// that are not finite or out of range are rejected, since they cannot be
    /// written back as JSON numbers.
    pub fn add_marker(
        &mut self,
        coordinate: Coordinate,
        note: impl Into<String>,
    ) -> Result<&TreeMarker> {
        if !coordinate.is_valid() {
            return Err(AppError::InvalidCoordinate {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            });
        }

        let mut marker = TreeMarker::new(coordinate, note);
        while self.markers.iter().any(|m| m.id == marker.id) {
            marker.id = Uuid::new_v4();
        }
        tracing::debug!(id = %marker.id, "Marker added");

        self.markers.insert(0, marker);
        self.changed();
        Ok(&self.markers[0])
    }

    /// Remove the marker with `id`. Returns `false` (and does nothing) if
    /// there is no such marker.
    pub fn remove_marker(&mut self, id: Uuid) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        if self.markers.len() == before {
            tracing::debug!(%id, "Remove ignored, no such marker");
            return false;
        }

        tracing::debug!(%id, "Marker removed");
        self.changed();
        true
    }

    pub fn remove_all(&mut self) {
        let count = self.markers.len();
        self.markers.clear();
        tracing::info!(count, "All markers removed");
        self.changed();
    }

    /// Write the current list to disk now.
    ///
    /// The snapshot is taken before the first await, so later mutations are
    /// not part of this write. Failures are logged, never retried.
    pub async fn persist(&self) {
        let snapshot = self.snapshot();
        let count = snapshot.len();
        match self.file.write_locked(&self.write_lock, snapshot).await {
            Ok(()) => tracing::debug!(count, "Markers persisted"),
            Err(e) => tracing::error!(
                path = %self.file.path().display(),
                error = %e,
                "Failed to persist markers"
            ),
        }
    }

    /// Wait for all scheduled background writes to be attempted.
    pub async fn flush(&self) {
        if let Some(write_behind) = &self.write_behind {
            write_behind.flush().await;
        }
    }

    /// Receive a fresh snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.changes.subscribe()
    }

    /// Current markers, newest first.
    pub fn markers(&self) -> &[TreeMarker] {
        &self.markers
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::from(self.markers.as_slice())
    }

    pub fn total_trees_discovered(&self) -> usize {
        self.markers.len()
    }

    pub fn file(&self) -> &MarkerFile {
        &self.file
    }

    fn changed(&mut self) {
        self.notify();
        if let Some(write_behind) = self.write_behind.as_mut() {
            write_behind.schedule(Arc::from(self.markers.as_slice()));
        }
    }

    fn notify(&self) {
        self.changes.send_replace(self.snapshot());
    }
}

/// Drop records whose id already appeared; the first occurrence wins.
fn dedup_by_id(markers: Vec<TreeMarker>) -> Vec<TreeMarker> {
    let mut seen = HashSet::with_capacity(markers.len());
    let total = markers.len();
    let unique: Vec<TreeMarker> = markers.into_iter().filter(|m| seen.insert(m.id)).collect();
    if unique.len() != total {
        tracing::warn!(dropped = total - unique.len(), "Dropped markers with duplicate ids");
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn detached_store() -> MarkerStore {
        MarkerStore::without_persistence(MarkerFile::new("/nonexistent/tree_markers.json"))
    }

    #[test]
    fn test_add_marker_places_newest_first() {
        let mut store = detached_store();
        store.add_marker(Coordinate::new(1.0, 1.0), "First").unwrap();
        store.add_marker(Coordinate::new(2.0, 2.0), "Second").unwrap();

        let notes: Vec<&str> = store.markers().iter().map(|m| m.note.as_str()).collect();
        assert_eq!(notes, vec!["Second", "First"]);
        assert_eq!(store.total_trees_discovered(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = detached_store();
        for _ in 0..50 {
            store.add_marker(Coordinate::new(1.0, 1.0), "").unwrap();
        }
        let ids: HashSet<Uuid> = store.markers().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_rejects_invalid_coordinates() {
        let mut store = detached_store();
        let mut rx = store.subscribe();

        for coordinate in [
            Coordinate::new(f64::NAN, 18.0),
            Coordinate::new(59.3, f64::INFINITY),
            Coordinate::new(91.0, 18.0),
            Coordinate::new(59.3, -180.5),
        ] {
            let err = store.add_marker(coordinate, "bad").unwrap_err();
            assert!(matches!(err, AppError::InvalidCoordinate { .. }));
        }

        assert_eq!(store.total_trees_discovered(), 0);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = detached_store();
        store.add_marker(Coordinate::new(1.0, 1.0), "Keep").unwrap();

        assert!(!store.remove_marker(Uuid::new_v4()));
        assert_eq!(store.total_trees_discovered(), 1);
    }

    #[test]
    fn test_remove_marker_by_id() {
        let mut store = detached_store();
        let first = store.add_marker(Coordinate::new(1.0, 1.0), "First").unwrap().id;
        store.add_marker(Coordinate::new(2.0, 2.0), "Second").unwrap();

        assert!(store.remove_marker(first));
        assert_eq!(store.markers().len(), 1);
        assert_eq!(store.markers()[0].note, "Second");
    }

    #[test]
    fn test_remove_all_clears() {
        let mut store = detached_store();
        store.add_marker(Coordinate::new(1.0, 1.0), "").unwrap();
        store.add_marker(Coordinate::new(1.0, 1.0), "").unwrap();
        store.remove_all();
        assert_eq!(store.total_trees_discovered(), 0);
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let mut store = detached_store();
        let mut rx = store.subscribe();

        store.add_marker(Coordinate::new(1.0, 1.0), "First").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        store.remove_all();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn test_snapshot_is_detached_from_later_mutations() {
        let mut store = detached_store();
        store.add_marker(Coordinate::new(1.0, 1.0), "First").unwrap();
        let snapshot = store.snapshot();
        store.add_marker(Coordinate::new(2.0, 2.0), "Second").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].note, "First");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let at = Utc.timestamp_opt(10, 0).unwrap();
        let original = TreeMarker::with_timestamp(Coordinate::new(1.0, 1.0), "first", at);
        let mut duplicate = original.clone();
        duplicate.note = "second".to_string();

        let unique = dedup_by_id(vec![original, duplicate]);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].note, "first");
    }
}
