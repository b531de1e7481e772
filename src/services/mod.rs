// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client state and business logic.

pub mod achievements;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod checkins;
pub mod favorite_toggle;
pub mod favorites;
pub mod preferences;
pub mod reviews;

pub use achievements::{Achievement, AchievementTracker, ActivitySummary};
pub use api::ApiClient;
pub use auth::{AuthSession, SessionState};
pub use catalog::{filter_places, search_places, CatalogService};
pub use checkins::CheckInService;
pub use favorite_toggle::FavoriteToggleService;
pub use favorites::{FavoriteSet, FavoritesStore};
pub use preferences::PreferencesService;
pub use reviews::ReviewService;
