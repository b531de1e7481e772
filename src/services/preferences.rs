// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Theme and language preferences as observable state.

use crate::error::Result;
use crate::models::{Language, Theme};
use crate::storage::LocalStorage;
use tokio::sync::watch;

/// Holds the active theme and language.
///
/// Each value has a single writer (this service) and any number of
/// subscribers that see the latest value on subscribe.
pub struct PreferencesService {
    storage: LocalStorage,
    theme: watch::Sender<Theme>,
    language: watch::Sender<Language>,
}

impl PreferencesService {
    /// Start from the persisted values, falling back to light theme and
    /// `default_language`.
    pub fn new(storage: LocalStorage, default_language: Language) -> Self {
        let theme = storage.theme().unwrap_or_default();
        let language = storage.language().unwrap_or(default_language);
        Self {
            storage,
            theme: watch::Sender::new(theme),
            language: watch::Sender::new(language),
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme.borrow()
    }

    pub fn language(&self) -> Language {
        *self.language.borrow()
    }

    pub fn subscribe_theme(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }

    pub fn subscribe_language(&self) -> watch::Receiver<Language> {
        self.language.subscribe()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.storage.set_theme(theme)?;
        self.theme.send_if_modified(|current| {
            let changed = *current != theme;
            *current = theme;
            changed
        });
        Ok(())
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.storage.set_language(language)?;
        self.language.send_if_modified(|current| {
            let changed = *current != language;
            *current = language;
            changed
        });
        Ok(())
    }

    /// Apply a user's saved preferences.
    pub fn apply(&self, theme: Theme, language: Language) -> Result<()> {
        tracing::debug!(theme = %theme, language = %language, "Applying preferences");
        self.set_theme(theme)?;
        self.set_language(language)
    }

    /// Back to the default (light) theme. Language is kept.
    pub fn reset_theme(&self) -> Result<()> {
        self.set_theme(Theme::Light)
    }
}
