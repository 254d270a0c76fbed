// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Discovered tree marker model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within [-90, 90] latitude and [-180, 180] longitude.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Unweighted midpoint of the raw degree values.
    ///
    /// Not a great-circle midpoint; fine for the short distances zones merge over.
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        // geo uses x = longitude, y = latitude
        geo::Point::new(c.longitude, c.latitude)
    }
}

/// A tree the user recorded on the map.
///
/// Stored as one element of the JSON array in `tree_markers.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TreeMarker {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-form note, already trimmed by the caller
    pub note: String,
    /// Creation time (ISO 8601)
    #[serde(with = "crate::time_utils::iso8601")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

impl TreeMarker {
    /// Create a marker with a fresh id stamped with the current time.
    pub fn new(coordinate: Coordinate, note: impl Into<String>) -> Self {
        Self::with_timestamp(coordinate, note, Utc::now())
    }

    pub fn with_timestamp(
        coordinate: Coordinate,
        note: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            note: note.into(),
            created_at,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
