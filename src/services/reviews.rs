// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reviews: listing, posting and deleting.

use crate::error::Result;
use crate::models::{NewReview, Review};
use crate::services::{AchievementTracker, ApiClient, AuthSession, CatalogService};
use std::sync::Arc;
use validator::Validate;

pub struct ReviewService {
    api: ApiClient,
    session: Arc<AuthSession>,
    catalog: Arc<CatalogService>,
    achievements: Arc<AchievementTracker>,
}

impl ReviewService {
    pub fn new(
        api: ApiClient,
        session: Arc<AuthSession>,
        catalog: Arc<CatalogService>,
        achievements: Arc<AchievementTracker>,
    ) -> Self {
        Self {
            api,
            session,
            catalog,
            achievements,
        }
    }

    /// Public list of reviews for a café.
    pub async fn list(&self, cafe_id: i64) -> Result<Vec<Review>> {
        self.api.list_reviews(cafe_id).await
    }

    /// Post a review. Requires a session and a rating between 1 and 5.
    pub async fn create(&self, review: &NewReview) -> Result<Review> {
        self.session.require_user()?;
        review.validate()?;

        let created = self.api.create_review(review).await?;
        tracing::info!(cafe_id = created.cafe_id, review_id = created.id, "Review posted");

        self.catalog.bump_review_count(created.cafe_id);
        if let Err(e) = self.session.patch_user(|user| user.review_count += 1) {
            tracing::warn!(error = %e, "Failed to cache review count");
        }
        if let Some(user) = self.session.current_user() {
            if let Err(e) = self.achievements.observe_user(&user) {
                tracing::warn!(error = %e, "Failed to record achievements");
            }
        }
        Ok(created)
    }

    /// Delete one of the user's reviews.
    pub async fn delete(&self, review_id: i64) -> Result<()> {
        self.session.require_user()?;
        self.api.delete_review(review_id).await?;
        tracing::info!(review_id, "Review deleted");

        if let Err(e) = self
            .session
            .patch_user(|user| user.review_count = user.review_count.saturating_sub(1))
        {
            tracing::warn!(error = %e, "Failed to cache review count");
        }
        Ok(())
    }
}
