// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Beanly REST API client.
//!
//! Handles:
//! - Bearer token injection for everything outside the public allowlist
//! - Mapping HTTP failures to [`AppError`] values
//! - Typed request/response bodies for every endpoint the client uses

use crate::error::{AppError, Result};
use crate::models::{
    AuthResponse, AuthUser, CheckIn, Language, LoginRequest, NewReview, Place, RegisterRequest,
    Review, UserSettingsPatch,
};
use crate::storage::LocalStorage;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

/// Requests that never carry the session token.
const PUBLIC_POSTS: &[&str] = &["/auth/login", "/auth/register"];
const PUBLIC_GET_PREFIXES: &[&str] = &["/cafes", "/reviews"];

/// Whether a request goes out without `Authorization`.
pub fn is_public_endpoint(method: &Method, path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    if *method == Method::POST {
        return PUBLIC_POSTS.contains(&path);
    }
    if *method == Method::GET {
        return PUBLIC_GET_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)));
    }
    false
}

/// Beanly backend client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: LocalStorage,
}

impl ApiClient {
    /// Create a client for `base_url` (including the `/api` base path).
    ///
    /// The session token is read from `storage` on every request, so a
    /// login or logout takes effect for the next call.
    pub fn new(base_url: &str, storage: LocalStorage) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Catalog ─────────────────────────────────────────────

    /// List all cafés with localized tag names.
    pub async fn list_cafes(&self, language: Language) -> Result<Vec<Place>> {
        let request = self
            .request(Method::GET, "/cafes")
            .query(&[("lang", language.as_str())]);
        self.send_json(request).await
    }

    /// Get one café by ID.
    pub async fn get_cafe(&self, cafe_id: i64, language: Language) -> Result<Place> {
        let request = self
            .request(Method::GET, &format!("/cafes/{}", cafe_id))
            .query(&[("lang", language.as_str())]);
        self.send_json(request).await
    }

    // ─── Auth ────────────────────────────────────────────────

    /// Exchange credentials for a session token.
    pub async fn login(&self, body: &LoginRequest) -> Result<AuthResponse> {
        let request = self.request(Method::POST, "/auth/login").json(body);
        match self.send_json(request).await {
            // No session is involved yet, so 401 means bad credentials.
            Err(AppError::InvalidToken) => Err(AppError::Api {
                status: 401,
                message: "Invalid email or password".to_string(),
            }),
            other => other,
        }
    }

    /// Create an account. A duplicate email is reported as [`AppError::EmailTaken`].
    pub async fn register(&self, body: &RegisterRequest) -> Result<()> {
        let request = self.request(Method::POST, "/auth/register").json(body);
        match self.send(request).await {
            Ok(_) => Ok(()),
            Err(AppError::Api { status: 409, .. }) => Err(AppError::EmailTaken),
            Err(e) => Err(e),
        }
    }

    // ─── Users ───────────────────────────────────────────────

    pub async fn get_me(&self) -> Result<AuthUser> {
        let request = self.request(Method::GET, "/users/me");
        self.send_json(request).await
    }

    /// Apply a partial settings update and return the full updated user.
    pub async fn update_settings(&self, patch: &UserSettingsPatch) -> Result<AuthUser> {
        let request = self.request(Method::PATCH, "/users/settings").json(patch);
        self.send_json(request).await
    }

    pub async fn add_favorite(&self, cafe_id: i64) -> Result<()> {
        let body = serde_json::json!({ "cafeId": cafe_id });
        let request = self
            .request(Method::POST, "/users/me/favorites")
            .json(&body);
        self.send(request).await.map(|_| ())
    }

    pub async fn remove_favorite(&self, cafe_id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/users/me/favorites/{}", cafe_id));
        self.send(request).await.map(|_| ())
    }

    // ─── Reviews ─────────────────────────────────────────────

    pub async fn list_reviews(&self, cafe_id: i64) -> Result<Vec<Review>> {
        let request = self
            .request(Method::GET, "/reviews")
            .query(&[("cafeId", cafe_id.to_string())]);
        self.send_json(request).await
    }

    pub async fn create_review(&self, review: &NewReview) -> Result<Review> {
        let request = self.request(Method::POST, "/reviews").json(review);
        self.send_json(request).await
    }

    pub async fn delete_review(&self, review_id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/reviews/{}", review_id));
        self.send(request).await.map(|_| ())
    }

    // ─── Check-ins ───────────────────────────────────────────

    pub async fn check_in(&self, cafe_id: i64) -> Result<CheckIn> {
        let request = self.request(Method::POST, &format!("/checkins/{}", cafe_id));
        self.send_json(request).await
    }

    pub async fn list_check_ins(&self, cafe_id: i64) -> Result<Vec<CheckIn>> {
        let request = self.request(Method::GET, &format!("/checkins/cafe/{}", cafe_id));
        self.send_json(request).await
    }

    // ─── Plumbing ────────────────────────────────────────────

    /// Build a request, attaching the bearer token unless the endpoint is public.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let public = is_public_endpoint(&method, path);
        tracing::debug!(method = %method, path, public, "API request");

        let builder = self.http.request(method, url);
        if public {
            return builder;
        }
        match self.storage.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        check_response(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON parse error: {}", e)))
    }
}

/// Error body shapes the backend uses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    code: Option<String>,
}

/// Check response status and map failures to [`AppError`].
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("Backend rejected session token (401)");
        return Err(AppError::InvalidToken);
    }

    if body.code.as_deref() == Some("EMAIL_TAKEN") {
        return Err(AppError::EmailTaken);
    }

    let message = body
        .message
        .or(body.error)
        .filter(|m| !m.is_empty())
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| status.to_string());

    tracing::warn!(status = status.as_u16(), message = %message, "Backend request failed");
    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}
