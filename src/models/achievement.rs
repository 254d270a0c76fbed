// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Achievement catalog.

use serde::Serialize;

/// A milestone unlocked by discovering enough trees.
///
/// `title_key` and `subtitle_key` are localization keys; resolving them to
/// display text is up to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title_key: &'static str,
    pub subtitle_key: &'static str,
    pub icon: &'static str,
    pub threshold: u32,
}

impl Achievement {
    pub fn is_unlocked(&self, total_trees: u32) -> bool {
        total_trees >= self.threshold
    }
}

/// The static catalog, ordered by threshold.
pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first-tree",
        title_key: "achievement.first_tree.title",
        subtitle_key: "achievement.first_tree.subtitle",
        icon: "🎄",
        threshold: 1,
    },
    Achievement {
        id: "frost-trail",
        title_key: "achievement.frost_trail.title",
        subtitle_key: "achievement.frost_trail.subtitle",
        icon: "❄️",
        threshold: 10,
    },
    Achievement {
        id: "north-star",
        title_key: "achievement.north_star.title",
        subtitle_key: "achievement.north_star.subtitle",
        icon: "🌟",
        threshold: 25,
    },
    Achievement {
        id: "aurora-leader",
        title_key: "achievement.aurora_leader.title",
        subtitle_key: "achievement.aurora_leader.subtitle",
        icon: "🛷",
        threshold: 50,
    },
    Achievement {
        id: "legend",
        title_key: "achievement.legend.title",
        subtitle_key: "achievement.legend.subtitle",
        icon: "👑",
        threshold: 100,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocks_at_threshold() {
        let achievement = Achievement {
            id: "test",
            title_key: "test.title",
            subtitle_key: "test.subtitle",
            icon: "",
            threshold: 5,
        };
        assert!(!achievement.is_unlocked(4));
        assert!(achievement.is_unlocked(5));
    }

    #[test]
    fn test_catalog_is_sorted_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for pair in ACHIEVEMENTS.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
        for achievement in ACHIEVEMENTS {
            assert!(seen.insert(achievement.id), "Duplicate id: {}", achievement.id);
        }
    }
}
