// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog loading and filtering.

use crate::error::{AppError, Result};
use crate::models::{
    ActiveFilters, FilterCatalog, FilterCategory, Language, Place, LOCATION_CATEGORY,
};
use crate::services::{ApiClient, PreferencesService};
use std::sync::Arc;
use tokio::sync::watch;

/// Keep the places that satisfy every active filter category.
///
/// Within a category any selected option may match; across categories all
/// must. `location` options match the city as a case-insensitive substring,
/// other categories match tag names exactly. Selected keys without a known
/// label are matched verbatim. Input order is preserved.
pub fn filter_places(
    places: &[Place],
    filters: &ActiveFilters,
    categories: &[FilterCategory],
) -> Vec<Place> {
    let constraints: Vec<(bool, Vec<String>)> = filters
        .active_categories()
        .map(|(category_key, selected)| {
            let category = categories.iter().find(|c| c.key == category_key);
            let is_location = category_key == LOCATION_CATEGORY;
            let labels = selected
                .into_iter()
                .map(|option| {
                    let label = category
                        .and_then(|c| c.label_for(option))
                        .unwrap_or(option);
                    if is_location {
                        label.to_lowercase()
                    } else {
                        label.to_string()
                    }
                })
                .collect();
            (is_location, labels)
        })
        .collect();

    if constraints.is_empty() {
        return places.to_vec();
    }

    places
        .iter()
        .filter(|place| {
            constraints.iter().all(|(is_location, labels)| {
                if *is_location {
                    let city = place.city.to_lowercase();
                    labels.iter().any(|label| city.contains(label.as_str()))
                } else {
                    labels.iter().any(|label| place.has_tag_named(label))
                }
            })
        })
        .cloned()
        .collect()
}

/// Free-text search over name, city and address (case-insensitive).
pub fn search_places(places: &[Place], query: &str) -> Vec<Place> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return places.to_vec();
    }

    places
        .iter()
        .filter(|p| {
            [&p.name, &p.city, &p.address]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Loaded catalog plus the taxonomy of the language it was loaded in.
pub struct CatalogService {
    api: ApiClient,
    preferences: Arc<PreferencesService>,
    places: watch::Sender<Vec<Place>>,
    taxonomy: watch::Sender<Option<(Language, Arc<FilterCatalog>)>>,
}

impl CatalogService {
    pub fn new(api: ApiClient, preferences: Arc<PreferencesService>) -> Self {
        Self {
            api,
            preferences,
            places: watch::Sender::new(Vec::new()),
            taxonomy: watch::Sender::new(None),
        }
    }

    /// Fetch the catalog in the current UI language.
    pub async fn refresh(&self) -> Result<Vec<Place>> {
        let language = self.preferences.language();
        let places = self.api.list_cafes(language).await?;
        tracing::info!(count = places.len(), language = %language, "Catalog loaded");
        self.places.send_replace(places.clone());
        Ok(places)
    }

    /// Fetch one café and fold it into the loaded catalog.
    pub async fn place(&self, cafe_id: i64) -> Result<Place> {
        let place = self
            .api
            .get_cafe(cafe_id, self.preferences.language())
            .await?;
        self.places.send_if_modified(|places| {
            match places.iter_mut().find(|p| p.id == cafe_id) {
                Some(existing) if *existing != place => {
                    *existing = place.clone();
                    true
                }
                _ => false,
            }
        });
        Ok(place)
    }

    pub fn places(&self) -> Vec<Place> {
        self.places.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Place>> {
        self.places.subscribe()
    }

    /// Filter taxonomy for the current UI language.
    pub fn taxonomy(&self) -> Result<Arc<FilterCatalog>> {
        let language = self.preferences.language();
        if let Some((cached_language, catalog)) = self.taxonomy.borrow().as_ref() {
            if *cached_language == language {
                return Ok(catalog.clone());
            }
        }

        let catalog = Arc::new(FilterCatalog::for_language(language).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Bundled filter taxonomy is invalid: {}", e))
        })?);
        self.taxonomy
            .send_replace(Some((language, catalog.clone())));
        Ok(catalog)
    }

    /// Loaded places narrowed by `filters` and a free-text `query`.
    pub fn filtered(&self, filters: &ActiveFilters, query: &str) -> Result<Vec<Place>> {
        let taxonomy = self.taxonomy()?;
        let places = self.places.borrow();
        let narrowed = filter_places(&places, filters, &taxonomy.categories);
        Ok(search_places(&narrowed, query))
    }

    /// Count a freshly posted review without refetching.
    pub fn bump_review_count(&self, cafe_id: i64) {
        self.places.send_if_modified(|places| {
            match places.iter_mut().find(|p| p.id == cafe_id) {
                Some(place) => {
                    place.bump_review_count();
                    true
                }
                None => false,
            }
        });
    }
}
