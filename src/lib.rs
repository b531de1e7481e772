// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Beanly: client core for the café discovery and review app.
//!
//! This crate provides the state and logic behind the Beanly front end:
//! catalog filtering, the session lifecycle, favorites, reviews, check-ins
//! and achievements, all backed by the Beanly REST API.

pub mod config;
pub mod error;
pub mod icons;
pub mod models;
pub mod services;
pub mod storage;

use config::Config;
use error::Result;
use models::{AuthUser, Place, UserSettingsPatch};
use services::{
    AchievementTracker, ApiClient, AuthSession, CatalogService, CheckInService,
    FavoriteToggleService, FavoritesStore, PreferencesService, ReviewService,
};
use std::sync::Arc;
use storage::{FileStore, LocalStorage};

/// Shared client state, passed explicitly to whatever drives the UI.
pub struct Beanly {
    pub config: Config,
    pub storage: LocalStorage,
    pub api: ApiClient,
    pub preferences: Arc<PreferencesService>,
    pub session: Arc<AuthSession>,
    pub favorites: Arc<FavoritesStore>,
    pub favorite_toggle: FavoriteToggleService,
    pub catalog: Arc<CatalogService>,
    pub reviews: ReviewService,
    pub check_ins: CheckInService,
    pub achievements: Arc<AchievementTracker>,
}

impl Beanly {
    /// Wire every service on top of `storage`.
    pub fn new(config: Config, storage: LocalStorage) -> Self {
        let api = ApiClient::new(&config.api_base_url, storage.clone());
        let preferences = Arc::new(PreferencesService::new(
            storage.clone(),
            config.default_language,
        ));
        let session = Arc::new(AuthSession::new(
            api.clone(),
            storage.clone(),
            preferences.clone(),
        ));
        let favorites = Arc::new(FavoritesStore::new(api.clone(), session.clone()));
        let achievements = Arc::new(AchievementTracker::new(storage.clone()));
        let favorite_toggle =
            FavoriteToggleService::new(session.clone(), favorites.clone(), achievements.clone());
        let catalog = Arc::new(CatalogService::new(api.clone(), preferences.clone()));
        let reviews = ReviewService::new(
            api.clone(),
            session.clone(),
            catalog.clone(),
            achievements.clone(),
        );
        let check_ins = CheckInService::new(api.clone(), session.clone(), achievements.clone());

        Self {
            config,
            storage,
            api,
            preferences,
            session,
            favorites,
            favorite_toggle,
            catalog,
            reviews,
            check_ins,
            achievements,
        }
    }

    /// Open the file-backed storage named in `config`.
    pub fn open(config: Config) -> Result<Self> {
        let store = FileStore::open(&config.storage_path)?;
        Ok(Self::new(config, LocalStorage::new(Arc::new(store))))
    }

    /// App start: warm session from cache, refresh it, seed favorites.
    ///
    /// A failed refresh leaves the client anonymous; the error is returned
    /// so the caller can decide whether to show it.
    pub async fn bootstrap(&self) -> Result<Option<AuthUser>> {
        self.session.restore();
        let result = self.session.load_user_info().await;
        self.favorites.load();
        result
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser> {
        let result = self.session.login(email, password).await;
        self.favorites.load();
        result
    }

    pub fn logout(&self) -> Result<()> {
        let result = self.session.logout();
        self.favorites.clear();
        result
    }

    pub async fn update_profile(&self, patch: &UserSettingsPatch) -> Result<AuthUser> {
        let user = self.session.update_user_profile(patch).await?;
        self.favorites.load();
        Ok(user)
    }

    pub async fn toggle_favorite(&self, place: &Place) -> Result<bool> {
        self.favorite_toggle.toggle_favorite(place).await
    }
}
