// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reactive set of the current user's favorite cafés.
//!
//! The set is published over a watch channel, so new subscribers see the
//! latest snapshot immediately. Network calls are neither queued nor
//! deduplicated: when two calls for the same café race, whichever
//! completes last decides the local state.

use crate::error::{AppError, Result};
use crate::services::{ApiClient, AuthSession};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot of favorite café IDs.
pub type FavoriteSet = BTreeSet<i64>;

pub struct FavoritesStore {
    api: ApiClient,
    session: Arc<AuthSession>,
    favorites: watch::Sender<FavoriteSet>,
}

impl FavoritesStore {
    pub fn new(api: ApiClient, session: Arc<AuthSession>) -> Self {
        Self {
            api,
            session,
            favorites: watch::Sender::new(FavoriteSet::new()),
        }
    }

    /// Seed from the session user's `favoriteCafeIds` (empty when anonymous).
    pub fn load(&self) {
        let ids: FavoriteSet = self
            .session
            .current_user()
            .map(|u| u.favorite_cafe_ids.into_iter().collect())
            .unwrap_or_default();

        tracing::debug!(count = ids.len(), "Loaded favorites");
        self.favorites.send_if_modified(|current| {
            if *current == ids {
                return false;
            }
            *current = ids;
            true
        });
    }

    /// Mark a café as favorite on the backend, then locally.
    ///
    /// The session user's `favorite_cafe_ids` is patched to match the set.
    pub async fn add(&self, cafe_id: i64) -> Result<()> {
        self.api.add_favorite(cafe_id).await?;
        self.ensure_session(cafe_id)?;

        self.favorites.send_if_modified(|set| set.insert(cafe_id));
        self.mirror(|ids| {
            if !ids.contains(&cafe_id) {
                ids.push(cafe_id);
            }
        });
        tracing::debug!(cafe_id, "Favorite added");
        Ok(())
    }

    /// Unmark a café on the backend, then locally.
    pub async fn remove(&self, cafe_id: i64) -> Result<()> {
        self.api.remove_favorite(cafe_id).await?;
        self.ensure_session(cafe_id)?;

        self.favorites.send_if_modified(|set| set.remove(&cafe_id));
        self.mirror(|ids| ids.retain(|id| *id != cafe_id));
        tracing::debug!(cafe_id, "Favorite removed");
        Ok(())
    }

    pub fn is_favorite(&self, cafe_id: i64) -> bool {
        self.favorites.borrow().contains(&cafe_id)
    }

    pub fn snapshot(&self) -> FavoriteSet {
        self.favorites.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FavoriteSet> {
        self.favorites.subscribe()
    }

    /// A logout that completed while the request was in flight wins.
    fn ensure_session(&self, cafe_id: i64) -> Result<()> {
        if self.session.is_authenticated() {
            return Ok(());
        }
        tracing::debug!(cafe_id, "Session ended before favorite update, dropping result");
        Err(AppError::NotAuthenticated)
    }

    /// Cached user copy; failures are logged, the set stays authoritative.
    fn mirror<F: FnOnce(&mut Vec<i64>)>(&self, f: F) {
        if let Err(e) = self.session.patch_user(|user| f(&mut user.favorite_cafe_ids)) {
            tracing::warn!(error = %e, "Failed to cache favorites on user");
        }
    }

    /// Publish an empty set.
    pub fn clear(&self) {
        self.favorites.send_if_modified(|set| {
            let had_any = !set.is_empty();
            set.clear();
            had_any
        });
    }
}
