// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Café catalog models.

use serde::{Deserialize, Serialize};

/// A café in the catalog, as returned by `GET /cafes`.
///
/// Snapshots are immutable apart from [`Place::bump_review_count`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub working_hours: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

impl Place {
    /// Whether any tag carries exactly this display name.
    pub fn has_tag_named(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Optimistically count a review that was just posted.
    pub fn bump_review_count(&mut self) {
        self.review_count = self.review_count.saturating_add(1);
    }

    /// First photo, used as the card cover.
    pub fn cover_photo(&self) -> Option<&str> {
        self.photo_urls.first().map(String::as_str)
    }
}

/// A label attached to a place (amenity, vibe, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub key: String,
    pub name: String,
}
