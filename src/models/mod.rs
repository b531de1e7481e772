// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the client.

pub mod filter;
pub mod place;
pub mod preferences;
pub mod review;
pub mod user;

pub use filter::{ActiveFilters, FilterCatalog, FilterCategory, FilterOption, LOCATION_CATEGORY};
pub use place::{Place, Tag};
pub use preferences::{Language, Theme};
pub use review::{CheckIn, NewReview, Review};
pub use user::{
    AuthResponse, AuthUser, LoginRequest, PublicProfile, RegisterRequest, UserSettingsPatch,
};
