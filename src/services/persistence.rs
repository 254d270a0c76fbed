// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marker file I/O and the write-behind persistence worker.
//!
//! Writes go through a temp file in the target directory that is renamed over
//! the marker file, so a reader only ever sees a complete JSON array. All
//! writes (worker and direct) serialize on one shared lock.

use crate::error::{AppError, Result};
use crate::models::TreeMarker;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::{watch, Mutex};

/// Immutable copy of the marker list handed to writers and subscribers.
pub type Snapshot = Arc<[TreeMarker]>;

/// Lock shared by every writer of one marker file.
pub type WriteLock = Arc<Mutex<()>>;

/// Location of the persisted marker list.
#[derive(Debug, Clone)]
pub struct MarkerFile {
    path: PathBuf,
}

impl MarkerFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the marker list. A missing file is an empty list.
    pub fn read(&self) -> Result<Vec<TreeMarker>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::StorageRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&data).map_err(|e| AppError::Decode(e.to_string()))
    }

    /// Encode and atomically replace the marker file.
    pub fn write(&self, markers: &[TreeMarker]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .map_err(|e| AppError::StorageUnavailable(format!("{}: {}", dir.display(), e)))?;

        let data = serde_json::to_vec(markers).map_err(|e| AppError::Encode(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| AppError::StorageWrite(format!("temp file: {}", e)))?;
        tmp.write_all(&data)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| AppError::StorageWrite(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| AppError::StorageWrite(format!("{}: {}", self.path.display(), e)))?;

        Ok(())
    }

    /// `read` on the blocking pool.
    pub async fn read_async(&self) -> Result<Vec<TreeMarker>> {
        let file = self.clone();
        tokio::task::spawn_blocking(move || file.read())
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Marker read task failed: {}", e)))?
    }

    /// `write` on the blocking pool, holding `lock` for the whole write.
    pub async fn write_locked(&self, lock: &Mutex<()>, snapshot: Snapshot) -> Result<()> {
        let _guard = lock.lock().await;
        let file = self.clone();
        tokio::task::spawn_blocking(move || file.write(&snapshot))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Marker write task failed: {}", e)))?
    }
}

#[derive(Debug, Clone)]
struct PendingWrite {
    generation: u64,
    snapshot: Snapshot,
}

/// Single background writer draining persist requests.
///
/// Requests are published on a watch channel, so a burst of requests made
/// while a write is running collapses into one write of the newest snapshot.
#[derive(Debug)]
pub struct WriteBehind {
    pending: watch::Sender<PendingWrite>,
    completed: watch::Receiver<u64>,
    generation: u64,
}

impl WriteBehind {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// The worker stops once this handle is dropped and the last pending
    /// snapshot has been written.
    pub fn spawn(file: MarkerFile, lock: WriteLock) -> Self {
        let (pending, mut requests) = watch::channel(PendingWrite {
            generation: 0,
            snapshot: Arc::from(Vec::new()),
        });
        let (done, completed) = watch::channel(0u64);

        tokio::spawn(async move {
            while requests.changed().await.is_ok() {
                let PendingWrite {
                    generation,
                    snapshot,
                } = requests.borrow_and_update().clone();
                let count = snapshot.len();

                match file.write_locked(&lock, snapshot).await {
                    Ok(()) => tracing::debug!(generation, count, "Markers persisted"),
                    Err(e) => tracing::error!(
                        path = %file.path().display(),
                        generation,
                        error = %e,
                        "Failed to persist markers"
                    ),
                }

                done.send_replace(generation);
            }
            tracing::debug!(path = %file.path().display(), "Write-behind worker stopped");
        });

        Self {
            pending,
            completed,
            generation: 0,
        }
    }

    /// Queue `snapshot` for writing, replacing any request not yet picked up.
    pub fn schedule(&mut self, snapshot: Snapshot) -> u64 {
        self.generation += 1;
        self.pending.send_replace(PendingWrite {
            generation: self.generation,
            snapshot,
        });
        self.generation
    }

    /// Wait until every scheduled request has been attempted.
    pub async fn flush(&self) {
        let target = self.generation;
        let mut completed = self.completed.clone();
        // An error means the worker is gone and nothing is left to wait for.
        let _ = completed.wait_for(|done| *done >= target).await;
    }
}
