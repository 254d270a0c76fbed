// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marker creation flow and map focus, independent of any GUI.

use crate::models::Coordinate;
use crate::services::MarkerStore;
use serde::Serialize;
use uuid::Uuid;

/// Span (degrees) used when centering on the player.
const FOCUS_SPAN: f64 = 0.01;

/// Supplies the device's last known position.
pub trait LastLocationProvider {
    fn last_location(&self) -> Option<Coordinate>;
}

impl LastLocationProvider for Option<Coordinate> {
    fn last_location(&self) -> Option<Coordinate> {
        *self
    }
}

/// Visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn around(center: Coordinate, span: f64) -> Self {
        Self {
            center,
            latitude_delta: span,
            longitude_delta: span,
        }
    }
}

impl Default for MapRegion {
    /// Central Stockholm.
    fn default() -> Self {
        Self::around(Coordinate::new(59.3293, 18.0686), 0.05)
    }
}

/// State of the "add a tree" flow.
#[derive(Debug, Clone, Default)]
pub struct DiscoverySession {
    pending: Option<Coordinate>,
    note: String,
    sheet_open: bool,
    region: MapRegion,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start creating a marker at `coordinate` with an empty note.
    pub fn prepare_marker_creation(&mut self, coordinate: Coordinate) {
        self.pending = Some(coordinate);
        self.note.clear();
        self.sheet_open = true;
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Add the pending marker with its trimmed note and reset the flow.
    ///
    /// Returns `None` if nothing was pending or the store rejected the
    /// coordinate; a rejected marker leaves the flow open.
    pub fn commit(&mut self, store: &mut MarkerStore) -> Option<Uuid> {
        let coordinate = self.pending?;
        let id = match store.add_marker(coordinate, self.note.trim()) {
            Ok(marker) => marker.id,
            Err(e) => {
                tracing::warn!(error = %e, "Marker not added");
                return None;
            }
        };
        self.cancel();
        Some(id)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.note.clear();
        self.sheet_open = false;
    }

    /// Center the map on the last known location, if there is one.
    pub fn focus_on_user(&mut self, provider: &impl LastLocationProvider) -> Option<MapRegion> {
        let center = provider.last_location()?;
        self.region = MapRegion::around(center, FOCUS_SPAN);
        Some(self.region)
    }

    pub fn pending_coordinate(&self) -> Option<Coordinate> {
        self.pending
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn is_sheet_open(&self) -> bool {
        self.sheet_open
    }

    pub fn region(&self) -> MapRegion {
        self.region
    }
}
