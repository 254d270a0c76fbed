// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Tree Quest: discover and map trees around the city
//!
//! This crate provides the platform-independent core of the game: the
//! persisted marker store, profile leveling and achievements, coverage zone
//! clustering for the map overlay, and the friends roster cache.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{CoverageZoneBuilder, MarkerFile, MarkerStore, ProfileEngine};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: MarkerStore,
    pub profile: ProfileEngine,
    pub coverage: CoverageZoneBuilder,
}

impl AppState {
    /// Build state from config and load the stored markers.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn load(config: Config) -> Self {
        let mut store = MarkerStore::new(MarkerFile::new(config.marker_path()));
        store.load().await;

        let mut profile = ProfileEngine::new();
        profile.recalculate(store.total_trees_discovered());

        Self {
            coverage: CoverageZoneBuilder::from_config(&config),
            config,
            store,
            profile,
        }
    }

    /// Recompute derived profile state after the marker list changed.
    pub fn refresh_profile(&mut self) {
        self.profile.recalculate(self.store.total_trees_discovered());
    }
}
