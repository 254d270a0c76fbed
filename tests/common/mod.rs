// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;
use tree_quest::models::{Coordinate, TreeMarker};
use tree_quest::services::MarkerFile;

/// A fresh temp directory with a marker file path inside it.
///
/// Keep the `TempDir` alive for as long as the file is used.
#[allow(dead_code)]
pub fn temp_marker_file() -> (TempDir, MarkerFile) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file = MarkerFile::new(dir.path().join("tree_markers.json"));
    (dir, file)
}

/// UTC timestamp `secs` after the epoch.
#[allow(dead_code)]
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Marker with a fixed creation time.
#[allow(dead_code)]
pub fn marker_at(note: &str, lat: f64, lon: f64, secs: i64) -> TreeMarker {
    TreeMarker::with_timestamp(Coordinate::new(lat, lon), note, at(secs))
}
