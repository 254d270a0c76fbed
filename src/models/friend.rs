// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Friend profiles as returned by the social platform.

use super::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Avatar glyphs assigned to friends without a picture.
const AVATAR_PALETTE: [&str; 10] = [
    "🌲", "🎄", "❄️", "🦌", "🧚‍♀️", "🧝‍♂️", "🧙‍♂️", "🦉", "🪵", "🌌",
];

/// A tree visit shared by a friend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TreeVisit {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "crate::time_utils::iso8601")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

impl TreeVisit {
    pub fn new(coordinate: Coordinate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            created_at,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A friend from the roster. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Friend {
    /// Platform player id; a fresh UUID string when the payload has none
    #[serde(default = "fresh_id")]
    pub id: String,
    pub display_name: String,
    pub avatar: String,
    pub total_trees: u32,
    pub city: String,
    pub visits: Vec<TreeVisit>,
    #[serde(with = "crate::time_utils::iso8601")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_active: DateTime<Utc>,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

impl Friend {
    /// Minimal profile for a platform player with no tree history.
    pub fn from_player(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id: id.into(),
            avatar: Self::avatar_for(&display_name).to_string(),
            display_name,
            total_trees: 0,
            city: String::new(),
            visits: Vec::new(),
            last_active: Utc::now(),
        }
    }

    /// Pick a stable avatar glyph for a display name.
    pub fn avatar_for(display_name: &str) -> &'static str {
        // FNV-1a so the choice survives restarts
        let hash = display_name
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
                (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
            });
        AVATAR_PALETTE[(hash % AVATAR_PALETTE.len() as u64) as usize]
    }
}
