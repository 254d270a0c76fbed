// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coverage zone clustering for the map overlay.
//!
//! A single cheap pass: each coordinate joins the first existing zone (in
//! creation order, not the nearest) whose center is within the merge
//! distance, moving that center to the midpoint. Otherwise it starts a new
//! zone. The result depends on input order.

use crate::config::Config;
use crate::models::{Coordinate, CoverageZone, TreeMarker};
use geo::{Distance, Haversine, Point};

/// Merge distance as a fraction of the zone radius when none is given.
pub const DEFAULT_MERGE_FACTOR: f64 = 0.6;

/// Builds coverage zones with a fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageZoneBuilder {
    radius: f64,
    merge_distance: Option<f64>,
}

impl CoverageZoneBuilder {
    /// `radius` in meters.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            merge_distance: None,
        }
    }

    pub fn with_merge_distance(mut self, merge_distance: f64) -> Self {
        self.merge_distance = Some(merge_distance);
        self
    }

    pub fn from_config(config: &Config) -> Self {
        let builder = Self::new(config.coverage_radius);
        match config.merge_distance {
            Some(distance) => builder.with_merge_distance(distance),
            None => builder,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance (meters) at or under which a point joins a zone.
    pub fn threshold(&self) -> f64 {
        self.merge_distance.unwrap_or(self.radius * DEFAULT_MERGE_FACTOR)
    }

    pub fn build(&self, coordinates: &[Coordinate]) -> Vec<CoverageZone> {
        let threshold = self.threshold();
        let mut zones: Vec<CoverageZone> = Vec::new();

        for coordinate in coordinates {
            let existing = zones
                .iter_mut()
                .find(|zone| distance_meters(&zone.coordinate, coordinate) <= threshold);

            match existing {
                Some(zone) => zone.coordinate = zone.coordinate.midpoint(coordinate),
                None => zones.push(CoverageZone::new(*coordinate, self.radius)),
            }
        }

        tracing::debug!(
            points = coordinates.len(),
            zones = zones.len(),
            threshold,
            "Built coverage zones"
        );
        zones
    }

    /// Zones for the markers in their current (newest first) order.
    pub fn build_from_markers(&self, markers: &[TreeMarker]) -> Vec<CoverageZone> {
        let coordinates: Vec<Coordinate> = markers.iter().map(TreeMarker::coordinate).collect();
        self.build(&coordinates)
    }
}

/// Great-circle surface distance in meters.
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    Haversine.distance(Point::from(*a), Point::from(*b))
}
