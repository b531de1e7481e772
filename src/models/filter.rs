// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Filter taxonomy and the user's active filter selections.

use crate::models::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category key matched against the free-text city field instead of tags.
pub const LOCATION_CATEGORY: &str = "location";

/// A localized filter category (location, amenities, vibe, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCategory {
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub options: Vec<FilterOption>,
}

impl FilterCategory {
    /// Look up the display label for an option key.
    pub fn label_for(&self, option_key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.key == option_key)
            .map(|o| o.label.as_str())
    }
}

/// One selectable option inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub key: String,
    pub label: String,
}

/// Active selections: category key -> option key -> selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters(HashMap<String, HashMap<String, bool>>);

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selected flag of one option.
    pub fn select(&mut self, category: &str, option: &str, selected: bool) {
        self.0
            .entry(category.to_string())
            .or_default()
            .insert(option.to_string(), selected);
    }

    /// Flip one option, returning its new state.
    pub fn toggle(&mut self, category: &str, option: &str) -> bool {
        let flag = self
            .0
            .entry(category.to_string())
            .or_default()
            .entry(option.to_string())
            .or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Selected option keys of a category, sorted for stable output.
    pub fn selected(&self, category: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .0
            .get(category)
            .map(|opts| {
                opts.iter()
                    .filter(|(_, on)| **on)
                    .map(|(k, _)| k.as_str())
                    .collect()
            })
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Categories with at least one selected option.
    pub fn active_categories(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.0.keys().filter_map(move |cat| {
            let selected = self.selected(cat);
            (!selected.is_empty()).then_some((cat.as_str(), selected))
        })
    }

    /// True when no category constrains the catalog.
    pub fn is_empty(&self) -> bool {
        self.active_categories().next().is_none()
    }
}

impl FromIterator<(&'static str, &'static str)> for ActiveFilters {
    fn from_iter<I: IntoIterator<Item = (&'static str, &'static str)>>(iter: I) -> Self {
        let mut filters = ActiveFilters::new();
        for (category, option) in iter {
            filters.select(category, option, true);
        }
        filters
    }
}

/// The static, localized filter taxonomy.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterCatalog {
    pub categories: Vec<FilterCategory>,
}

impl FilterCatalog {
    /// Load the bundled taxonomy for a UI language.
    pub fn for_language(language: Language) -> Result<Self, serde_json::Error> {
        let raw = match language {
            Language::En => include_str!("../../data/filters.en.json"),
            Language::Uk => include_str!("../../data/filters.uk.json"),
        };
        serde_json::from_str(raw)
    }

    pub fn category(&self, key: &str) -> Option<&FilterCategory> {
        self.categories.iter().find(|c| c.key == key)
    }
}
