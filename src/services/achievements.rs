// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievements derived from a user's activity counts.
//!
//! The unlocked set lives in local storage under `unlockedAchievements`
//! so that an achievement is announced once per login.

use crate::error::Result;
use crate::models::AuthUser;
use crate::storage::LocalStorage;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Achievement {
    FirstReview,
    Critic,
    FirstCheckIn,
    Regular,
    Collector,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstReview,
        Achievement::Critic,
        Achievement::FirstCheckIn,
        Achievement::Regular,
        Achievement::Collector,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Achievement::FirstReview => "first_review",
            Achievement::Critic => "critic",
            Achievement::FirstCheckIn => "first_check_in",
            Achievement::Regular => "regular",
            Achievement::Collector => "collector",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    fn is_earned(self, activity: &ActivitySummary) -> bool {
        match self {
            Achievement::FirstReview => activity.reviews >= 1,
            Achievement::Critic => activity.reviews >= 10,
            Achievement::FirstCheckIn => activity.check_ins >= 1,
            Achievement::Regular => activity.check_ins >= 10,
            Achievement::Collector => activity.favorites >= 5,
        }
    }
}

/// Aggregate activity an achievement is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySummary {
    pub reviews: u32,
    pub check_ins: u32,
    pub favorites: u32,
}

impl From<&AuthUser> for ActivitySummary {
    fn from(user: &AuthUser) -> Self {
        Self {
            reviews: user.review_count,
            check_ins: user.check_in_count,
            favorites: u32::try_from(user.favorite_cafe_ids.len()).unwrap_or(u32::MAX),
        }
    }
}

pub struct AchievementTracker {
    storage: LocalStorage,
}

impl AchievementTracker {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Achievements recorded as unlocked. Unknown keys are ignored.
    pub fn unlocked(&self) -> BTreeSet<Achievement> {
        self.storage
            .unlocked_achievements()
            .iter()
            .filter_map(|k| Achievement::from_key(k))
            .collect()
    }

    /// Record everything `activity` earns; returns only the new unlocks.
    pub fn observe(&self, activity: &ActivitySummary) -> Result<Vec<Achievement>> {
        let mut keys = self.storage.unlocked_achievements();
        let newly: Vec<Achievement> = Achievement::ALL
            .into_iter()
            .filter(|a| a.is_earned(activity) && !keys.contains(a.key()))
            .collect();

        if newly.is_empty() {
            return Ok(newly);
        }

        keys.extend(newly.iter().map(|a| a.key().to_string()));
        self.storage.set_unlocked_achievements(&keys)?;
        for achievement in &newly {
            tracing::info!(achievement = achievement.key(), "Achievement unlocked");
        }
        Ok(newly)
    }

    pub fn observe_user(&self, user: &AuthUser) -> Result<Vec<Achievement>> {
        self.observe(&ActivitySummary::from(user))
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.clear_unlocked_achievements()
    }
}
