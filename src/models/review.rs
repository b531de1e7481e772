// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Review and check-in models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A published review of a café.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub cafe_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub author_name: String,
    pub rating: u8,
    #[serde(default)]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /reviews`.
///
/// `rating` is `None` until the user picks a star value.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub cafe_id: i64,
    #[validate(
        required(message = "Pick a rating"),
        range(min = 1, max = 5, message = "Rating must be between 1 and 5")
    )]
    pub rating: Option<u8>,
    #[validate(length(max = 2000, message = "Review is too long"))]
    pub text: String,
}

/// A recorded visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: i64,
    pub cafe_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
