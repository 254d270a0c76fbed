// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Coverage zone overlay model.

use super::Coordinate;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A circular overlay summarizing nearby markers.
///
/// Identity is the `id` assigned when the cluster first formed; the center
/// moves as points merge in, so two zones are equal iff their ids match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CoverageZone {
    pub id: Uuid,
    pub coordinate: Coordinate,
    /// Radius in meters
    pub radius: f64,
}

impl CoverageZone {
    pub fn new(coordinate: Coordinate, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinate,
            radius,
        }
    }
}

impl PartialEq for CoverageZone {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CoverageZone {}

impl Hash for CoverageZone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
