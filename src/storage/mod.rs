// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted client state ("local storage").
//!
//! The backend is authoritative; everything stored here is a cache that
//! lets the client start warm and carry the session token between runs.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{AppError, Result};
use crate::models::{AuthUser, Language, PublicProfile, Theme};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Storage key names as constants.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const THEME: &str = "theme";
    pub const LANG: &str = "lang";
    pub const UNLOCKED_ACHIEVEMENTS: &str = "unlockedAchievements";
    pub const PUBLIC_USER_PROFILE: &str = "publicUserProfile";
}

/// String key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed view over a [`KeyValueStore`].
#[derive(Clone)]
pub struct LocalStorage {
    store: Arc<dyn KeyValueStore>,
}

impl LocalStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// In-memory storage, nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // ─── Session ─────────────────────────────────────────────

    pub fn token(&self) -> Option<String> {
        self.store.get(keys::TOKEN).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(keys::TOKEN, token.to_string())
    }

    pub fn clear_token(&self) -> Result<()> {
        self.store.remove(keys::TOKEN)
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.get_json(keys::USER)
    }

    pub fn set_user(&self, user: &AuthUser) -> Result<()> {
        self.set_json(keys::USER, user)
    }

    pub fn clear_user(&self) -> Result<()> {
        self.store.remove(keys::USER)
    }

    pub fn public_profile(&self) -> Option<PublicProfile> {
        self.get_json(keys::PUBLIC_USER_PROFILE)
    }

    pub fn set_public_profile(&self, profile: &PublicProfile) -> Result<()> {
        self.set_json(keys::PUBLIC_USER_PROFILE, profile)
    }

    pub fn clear_public_profile(&self) -> Result<()> {
        self.store.remove(keys::PUBLIC_USER_PROFILE)
    }

    // ─── Preferences ─────────────────────────────────────────

    pub fn theme(&self) -> Option<Theme> {
        self.store.get(keys::THEME).and_then(|v| Theme::parse(&v))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.set(keys::THEME, theme.as_str().to_string())
    }

    pub fn language(&self) -> Option<Language> {
        self.store.get(keys::LANG).and_then(|v| Language::parse(&v))
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.store.set(keys::LANG, language.as_str().to_string())
    }

    // ─── Achievements ────────────────────────────────────────

    pub fn unlocked_achievements(&self) -> BTreeSet<String> {
        self.get_json::<Vec<String>>(keys::UNLOCKED_ACHIEVEMENTS)
            .map(|v| v.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn set_unlocked_achievements(&self, unlocked: &BTreeSet<String>) -> Result<()> {
        let list: Vec<&String> = unlocked.iter().collect();
        self.set_json(keys::UNLOCKED_ACHIEVEMENTS, &list)
    }

    pub fn clear_unlocked_achievements(&self) -> Result<()> {
        self.store.remove(keys::UNLOCKED_ACHIEVEMENTS)
    }

    // ─── JSON helpers ────────────────────────────────────────

    /// Read a JSON value; corrupt entries read as absent.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring corrupt storage entry");
                None
            }
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| AppError::Storage(format!("Failed to encode {}: {}", key, e)))?;
        self.store.set(key, raw)
    }
}
