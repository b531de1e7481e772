// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the Beanly backend.
//!
//! Every request is recorded (method, path, query, Authorization header)
//! so tests can assert which calls were made.

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use beanly::config::Config;
use beanly::models::{AuthUser, Language, Theme};
use beanly::storage::LocalStorage;
use beanly::Beanly;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

#[allow(dead_code)]
pub const EMAIL: &str = "olena@beanly.test";
#[allow(dead_code)]
pub const PASSWORD: &str = "latte2024";

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

pub struct MockState {
    pub token: String,
    pub user: Mutex<AuthUser>,
    pub places: Value,
    pub requests: Mutex<Vec<RecordedRequest>>,
    /// Favorite writes answer 500 while set.
    pub fail_favorites: AtomicBool,
    /// Favorite writes wait for `release_favorites` while set.
    pub hold_favorites: AtomicBool,
    pub release_favorites: Notify,
    /// `GET /users/me` and `PATCH /users/settings` wait for
    /// `release_profile` while set.
    pub hold_profile: AtomicBool,
    pub release_profile: Notify,
    /// Delay before the login endpoint answers.
    pub login_delay_ms: AtomicU64,
    next_id: AtomicI64,
}

impl MockState {
    fn new() -> Self {
        Self {
            token: jwt(chrono::Utc::now().timestamp() + 3600),
            user: Mutex::new(test_user()),
            places: places_json(),
            requests: Mutex::new(Vec::new()),
            fail_favorites: AtomicBool::new(false),
            hold_favorites: AtomicBool::new(false),
            release_favorites: Notify::new(),
            hold_profile: AtomicBool::new(false),
            release_profile: Notify::new(),
            login_delay_ms: AtomicU64::new(0),
            next_id: AtomicI64::new(100),
        }
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests matching a method and path.
    #[allow(dead_code)]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    #[allow(dead_code)]
    pub fn server_favorites(&self) -> Vec<i64> {
        self.user.lock().unwrap().favorite_cafe_ids.clone()
    }

    async fn profile_gate(&self) {
        if self.hold_profile.load(Ordering::SeqCst) {
            self.release_profile.notified().await;
        }
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.token);
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str())
    }
}

/// A running mock backend.
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Wait until the backend has seen a request to `path`.
    #[allow(dead_code)]
    pub async fn wait_for_request(&self, method: &str, path: &str) {
        for _ in 0..200 {
            if !self.state.requests_to(method, path).is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("backend never received {} {}", method, path);
    }
}

/// Start the mock backend on an ephemeral port.
pub async fn start_backend() -> MockBackend {
    let state = Arc::new(MockState::new());
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{}/api", addr),
        state,
    }
}

/// A client context pointed at `backend` with in-memory storage.
#[allow(dead_code)]
pub fn client(backend: &MockBackend) -> Beanly {
    client_with_storage(backend, LocalStorage::in_memory())
}

#[allow(dead_code)]
pub fn client_with_storage(backend: &MockBackend, storage: LocalStorage) -> Beanly {
    let config = Config {
        api_base_url: backend.base_url.clone(),
        ..Config::default()
    };
    Beanly::new(config, storage)
}

/// Backend and a logged-in client.
#[allow(dead_code)]
pub async fn logged_in() -> (MockBackend, Beanly) {
    let backend = start_backend().await;
    let app = client(&backend);
    app.login(EMAIL, PASSWORD).await.expect("login should succeed");
    (backend, app)
}

/// HS256 token with the given `exp`, as the backend would issue.
pub fn jwt(exp: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    encode(
        &Header::default(),
        &json!({ "sub": "1", "exp": exp }),
        &EncodingKey::from_secret(b"mock-backend-secret"),
    )
    .unwrap()
}

pub fn test_user() -> AuthUser {
    AuthUser {
        user_id: 1,
        first_name: "Olena".to_string(),
        last_name: "Koval".to_string(),
        email: EMAIL.to_string(),
        photo_url: None,
        default_city: Some("Kyiv".to_string()),
        favorite_cafe_ids: vec![3, 7],
        theme: Theme::Dark,
        language: Language::Uk,
        email_notifications: true,
        push_notifications: false,
        review_count: 0,
        check_in_count: 0,
    }
}

fn places_json() -> Value {
    json!([
        {
            "id": 3, "name": "Blue Cup", "rating": 4.7, "reviewCount": 12,
            "city": "Kyiv, Podil", "address": "Sahaidachnoho 10",
            "workingHours": "08:00-22:00",
            "tags": [{"id": 1, "key": "freeWifi", "name": "Wi-Fi"}],
            "photoUrls": []
        },
        {
            "id": 7, "name": "Lviv Roasters", "rating": 4.9, "reviewCount": 40,
            "city": "Lviv", "address": "Rynok Square 1",
            "workingHours": "09:00-21:00",
            "tags": [{"id": 2, "key": "quiet", "name": "Quiet"}],
            "photoUrls": []
        },
        {
            "id": 9, "name": "Harbor", "rating": 4.2, "reviewCount": 3,
            "city": "Odesa", "address": "Deribasivska 5",
            "workingHours": "07:00-23:00",
            "tags": [
                {"id": 1, "key": "freeWifi", "name": "Wi-Fi"},
                {"id": 3, "key": "terrace", "name": "Terrace"}
            ],
            "photoUrls": []
        }
    ])
}

// ─── Router ──────────────────────────────────────────────────

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/cafes", get(list_cafes))
        .route("/api/cafes/{id}", get(get_cafe))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/users/me", get(get_me))
        .route("/api/users/settings", patch(update_settings))
        .route("/api/users/me/favorites", post(add_favorite))
        .route("/api/users/me/favorites/{id}", delete(remove_favorite))
        .route("/api/reviews", get(list_reviews).post(create_review))
        .route("/api/reviews/{id}", delete(delete_review))
        .route("/api/checkins/{cafe_id}", post(check_in))
        .route("/api/checkins/cafe/{cafe_id}", get(list_check_ins))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized" })),
    )
        .into_response()
}

async fn list_cafes(State(state): State<Arc<MockState>>) -> Response {
    Json(state.places.clone()).into_response()
}

async fn get_cafe(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> Response {
    let found = state
        .places
        .as_array()
        .and_then(|places| places.iter().find(|p| p["id"] == json!(id)).cloned());
    match found {
        Some(place) => Json(place).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Cafe not found" }))).into_response(),
    }
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let delay = state.login_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if email == state.user.lock().unwrap().email && password == PASSWORD {
        Json(json!({ "token": state.token })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Bad credentials" })),
        )
            .into_response()
    }
}

async fn register(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if body["email"].as_str() == Some(state.user.lock().unwrap().email.as_str()) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email is already taken" })),
        )
            .into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn get_me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.profile_gate().await;
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let user = state.user.lock().unwrap().clone();
    Json(user).into_response()
}

async fn update_settings(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(patch): Json<Value>,
) -> Response {
    state.profile_gate().await;
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let mut user = state.user.lock().unwrap();
    if let Some(name) = patch["firstName"].as_str() {
        user.first_name = name.to_string();
    }
    if let Some(city) = patch["defaultCity"].as_str() {
        user.default_city = Some(city.to_string());
    }
    if let Some(theme) = patch["theme"].as_str().and_then(Theme::parse) {
        user.theme = theme;
    }
    if let Some(language) = patch["language"].as_str().and_then(Language::parse) {
        user.language = language;
    }
    Json(user.clone()).into_response()
}

/// Shared gate for favorite writes: auth, optional hold, optional failure.
async fn favorite_gate(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    if !state.authorized(headers) {
        return Some(unauthorized());
    }
    if state.hold_favorites.load(Ordering::SeqCst) {
        state.release_favorites.notified().await;
    }
    if state.fail_favorites.load(Ordering::SeqCst) {
        return Some(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Favorites unavailable" })),
            )
                .into_response(),
        );
    }
    None
}

async fn add_favorite(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = favorite_gate(&state, &headers).await {
        return response;
    }
    let Some(cafe_id) = body["cafeId"].as_i64() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let mut user = state.user.lock().unwrap();
    if !user.favorite_cafe_ids.contains(&cafe_id) {
        user.favorite_cafe_ids.push(cafe_id);
    }
    StatusCode::CREATED.into_response()
}

async fn remove_favorite(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Some(response) = favorite_gate(&state, &headers).await {
        return response;
    }
    state
        .user
        .lock()
        .unwrap()
        .favorite_cafe_ids
        .retain(|f| *f != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_reviews(Query(params): Query<HashMap<String, String>>) -> Response {
    let cafe_id: i64 = params
        .get("cafeId")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    Json(json!([{
        "id": 1, "cafeId": cafe_id, "userId": 2, "authorName": "Taras",
        "rating": 5, "text": "Best cortado in town",
        "createdAt": "2026-03-01T10:00:00Z"
    }]))
    .into_response()
}

async fn create_review(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "cafeId": body["cafeId"],
            "userId": 1,
            "authorName": "Olena Koval",
            "rating": body["rating"],
            "text": body["text"],
            "createdAt": chrono::Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}

async fn delete_review(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn check_in(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(cafe_id): Path<i64>,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "id": id,
        "cafeId": cafe_id,
        "userId": 1,
        "createdAt": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}

async fn list_check_ins(Path(cafe_id): Path<i64>) -> Response {
    Json(json!([
        { "id": 1, "cafeId": cafe_id, "userId": 2, "createdAt": "2026-01-01T09:00:00Z" },
        { "id": 2, "cafeId": cafe_id, "userId": 3, "createdAt": "2026-02-01T09:00:00Z" }
    ]))
    .into_response()
}
