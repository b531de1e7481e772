// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check-ins at cafés.

use crate::error::Result;
use crate::models::CheckIn;
use crate::services::{AchievementTracker, ApiClient, AuthSession};
use std::sync::Arc;

pub struct CheckInService {
    api: ApiClient,
    session: Arc<AuthSession>,
    achievements: Arc<AchievementTracker>,
}

impl CheckInService {
    pub fn new(
        api: ApiClient,
        session: Arc<AuthSession>,
        achievements: Arc<AchievementTracker>,
    ) -> Self {
        Self {
            api,
            session,
            achievements,
        }
    }

    /// Record a visit for the logged-in user.
    pub async fn check_in(&self, cafe_id: i64) -> Result<CheckIn> {
        self.session.require_user()?;

        let check_in = self.api.check_in(cafe_id).await?;
        tracing::info!(cafe_id, check_in_id = check_in.id, "Checked in");

        if let Err(e) = self.session.patch_user(|user| user.check_in_count += 1) {
            tracing::warn!(error = %e, "Failed to cache check-in count");
        }
        if let Some(user) = self.session.current_user() {
            if let Err(e) = self.achievements.observe_user(&user) {
                tracing::warn!(error = %e, "Failed to record achievements");
            }
        }
        Ok(check_in)
    }

    /// Visits recorded for a café, most recent first.
    pub async fn list_for_cafe(&self, cafe_id: i64) -> Result<Vec<CheckIn>> {
        let mut check_ins = self.api.list_check_ins(cafe_id).await?;
        check_ins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(check_ins)
    }
}
