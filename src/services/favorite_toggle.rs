// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite toggling for the logged-in user.

use crate::error::Result;
use crate::models::Place;
use crate::services::{AchievementTracker, AuthSession, FavoritesStore};
use std::sync::Arc;

pub struct FavoriteToggleService {
    session: Arc<AuthSession>,
    favorites: Arc<FavoritesStore>,
    achievements: Arc<AchievementTracker>,
}

impl FavoriteToggleService {
    pub fn new(
        session: Arc<AuthSession>,
        favorites: Arc<FavoritesStore>,
        achievements: Arc<AchievementTracker>,
    ) -> Self {
        Self {
            session,
            favorites,
            achievements,
        }
    }

    /// Flip the favorite status of `place`, returning the new status.
    ///
    /// Fails with `NotAuthenticated` before any network call when nobody is
    /// logged in. The store keeps `AuthUser::favorite_cafe_ids` in step with
    /// its set, so the user is never refetched.
    pub async fn toggle_favorite(&self, place: &Place) -> Result<bool> {
        self.session.require_user()?;
        let cafe_id = place.id;

        let now_favorite = if self.favorites.is_favorite(cafe_id) {
            self.favorites.remove(cafe_id).await?;
            false
        } else {
            self.favorites.add(cafe_id).await?;
            true
        };

        if let Some(user) = self.session.current_user() {
            if let Err(e) = self.achievements.observe_user(&user) {
                tracing::warn!(error = %e, "Failed to record achievements");
            }
        }

        tracing::info!(cafe_id, favorite = now_favorite, "Favorite toggled");
        Ok(now_favorite)
    }
}
