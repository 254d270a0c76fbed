// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile level, progress bar, and achievement partition.
//!
//! Derived from the total tree count only. The engine does not watch the
//! store; callers run `recalculate` whenever the count changes.

use crate::models::{Achievement, ACHIEVEMENTS};
use serde::Serialize;

/// Lower bound of each level, indexed by `level - 1`.
pub const LEVEL_THRESHOLDS: [u32; 5] = [0, 10, 25, 50, 100];

pub const MAX_LEVEL: u8 = LEVEL_THRESHOLDS.len() as u8;

/// Level (1-based) reached with `total` trees.
pub fn level_for(total: u32) -> u8 {
    let reached = LEVEL_THRESHOLDS
        .iter()
        .take_while(|&&threshold| total >= threshold)
        .count();
    reached.max(1) as u8
}

/// Tree count at which `level` starts. Levels past the table use the top entry.
pub fn threshold_for(level: u8) -> u32 {
    let index = usize::from(level.clamp(1, MAX_LEVEL)) - 1;
    LEVEL_THRESHOLDS[index]
}

/// Localization key for the title shown at `level`.
pub fn status_key_for(level: u8) -> &'static str {
    match level {
        0 | 1 => "profile.status.sprout",
        2 => "profile.status.orb",
        3 => "profile.status.comet",
        4 => "profile.status.aurora",
        _ => "profile.status.legend",
    }
}

/// Fraction of the way from `level` to the next one, in `[0, 1]`.
///
/// The top level has no successor and always reports 1.0.
pub fn progress_for(total: u32, level: u8) -> f64 {
    if level >= MAX_LEVEL {
        return 1.0;
    }
    let current = threshold_for(level);
    let next = threshold_for(level + 1);
    let span = f64::from(next.saturating_sub(current).max(1));
    ((f64::from(total) - f64::from(current)) / span).clamp(0.0, 1.0)
}

/// Result of the last recalculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileProgress {
    pub total_trees: u32,
    pub level: u8,
    pub progress_to_next_level: f64,
    pub status_key: &'static str,
}

impl ProfileProgress {
    pub fn for_total(total_trees: u32) -> Self {
        let level = level_for(total_trees);
        Self {
            total_trees,
            level,
            progress_to_next_level: progress_for(total_trees, level),
            status_key: status_key_for(level),
        }
    }
}

/// Profile state for one player.
#[derive(Debug, Clone)]
pub struct ProfileEngine {
    achievements: Vec<Achievement>,
    progress: ProfileProgress,
}

impl Default for ProfileEngine {
    fn default() -> Self {
        Self::with_achievements(ACHIEVEMENTS.to_vec())
    }
}

impl ProfileEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_achievements(achievements: Vec<Achievement>) -> Self {
        Self {
            achievements,
            progress: ProfileProgress::for_total(0),
        }
    }

    /// Recompute everything for a new tree count.
    pub fn recalculate(&mut self, total_trees: usize) -> &ProfileProgress {
        let total = u32::try_from(total_trees).unwrap_or(u32::MAX);
        let previous_level = self.progress.level;
        self.progress = ProfileProgress::for_total(total);

        if self.progress.level != previous_level {
            tracing::info!(
                level = self.progress.level,
                total_trees = total,
                "Profile level changed"
            );
        }
        &self.progress
    }

    pub fn progress(&self) -> &ProfileProgress {
        &self.progress
    }

    pub fn level(&self) -> u8 {
        self.progress.level
    }

    pub fn progress_to_next_level(&self) -> f64 {
        self.progress.progress_to_next_level
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn unlocked_achievements(&self) -> Vec<&Achievement> {
        let total = self.progress.total_trees;
        self.achievements
            .iter()
            .filter(|a| a.is_unlocked(total))
            .collect()
    }

    pub fn locked_achievements(&self) -> Vec<&Achievement> {
        let total = self.progress.total_trees;
        self.achievements
            .iter()
            .filter(|a| !a.is_unlocked(total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(total: usize) -> ProfileEngine {
        let mut engine = ProfileEngine::new();
        engine.recalculate(total);
        engine
    }

    #[test]
    fn test_new_player() {
        let engine = ProfileEngine::new();
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.progress_to_next_level(), 0.0);
        assert!(engine.unlocked_achievements().is_empty());
        assert_eq!(engine.progress().status_key, "profile.status.sprout");
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(9), 1);
        assert_eq!(level_for(10), 2);
        assert_eq!(level_for(24), 2);
        assert_eq!(level_for(25), 3);
        assert_eq!(level_for(30), 3);
        assert_eq!(level_for(50), 4);
        assert_eq!(level_for(99), 4);
        assert_eq!(level_for(100), 5);
        assert_eq!(level_for(u32::MAX), 5);
    }

    #[test]
    fn test_progress_at_level_start_is_zero() {
        assert_eq!(engine_at(10).progress_to_next_level(), 0.0);
        assert_eq!(engine_at(25).progress_to_next_level(), 0.0);
    }

    #[test]
    fn test_progress_within_level() {
        // level 3 spans 25..50
        let engine = engine_at(30);
        assert_eq!(engine.level(), 3);
        assert!((engine.progress_to_next_level() - 0.2).abs() < 1e-9);
        assert_eq!(engine.progress().status_key, "profile.status.comet");
    }

    #[test]
    fn test_top_level_progress_is_full() {
        assert_eq!(engine_at(100).progress_to_next_level(), 1.0);
        assert_eq!(engine_at(5000).progress_to_next_level(), 1.0);
        assert_eq!(engine_at(100).progress().status_key, "profile.status.legend");
    }

    #[test]
    fn test_thirty_trees_unlock_three() {
        let engine = engine_at(30);
        let unlocked: Vec<&str> = engine.unlocked_achievements().iter().map(|a| a.id).collect();
        assert_eq!(unlocked, vec!["first-tree", "frost-trail", "north-star"]);
        assert_eq!(
            engine.locked_achievements().len(),
            engine.achievements().len() - 3
        );
    }

    #[test]
    fn test_partition_covers_catalog() {
        for total in [0, 1, 9, 10, 24, 25, 49, 50, 99, 100, 1000] {
            let engine = engine_at(total);
            assert_eq!(
                engine.unlocked_achievements().len() + engine.locked_achievements().len(),
                engine.achievements().len(),
                "partition broken at {}",
                total
            );
        }
    }

    #[test]
    fn test_recalculate_tracks_growth() {
        let mut engine = engine_at(9);
        assert_eq!(engine.level(), 1);
        engine.recalculate(10);
        assert_eq!(engine.level(), 2);
    }

    #[test]
    fn test_threshold_clamps_out_of_range_levels() {
        assert_eq!(threshold_for(0), 0);
        assert_eq!(threshold_for(6), 100);
    }
}
