// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: login, registration, profile updates and logout.
//!
//! The session is a small state machine published over a watch channel:
//!
//! ```text
//! Anonymous ──login──▶ Authenticating ──ok──▶ Authenticated
//!     ▲                      │                     │
//!     └────────error─────────┘◀──logout / 401──────┘
//! ```

use crate::error::{AppError, Result};
use crate::models::{AuthUser, LoginRequest, PublicProfile, RegisterRequest, UserSettingsPatch};
use crate::services::{ApiClient, PreferencesService};
use crate::storage::LocalStorage;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::watch;
use validator::Validate;

/// Current session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated(AuthUser),
}

impl SessionState {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Owner of the authenticated user and the session token.
pub struct AuthSession {
    api: ApiClient,
    storage: LocalStorage,
    preferences: Arc<PreferencesService>,
    state: watch::Sender<SessionState>,
}

impl AuthSession {
    pub fn new(
        api: ApiClient,
        storage: LocalStorage,
        preferences: Arc<PreferencesService>,
    ) -> Self {
        Self {
            api,
            storage,
            preferences,
            state: watch::Sender::new(SessionState::Anonymous),
        }
    }

    // ─── Reads ───────────────────────────────────────────────

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Authenticated(_))
    }

    /// The current user, or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<AuthUser> {
        self.current_user().ok_or(AppError::NotAuthenticated)
    }

    // ─── Transitions ─────────────────────────────────────────

    /// Warm start from the cached user when a live token is stored.
    ///
    /// No network call; [`AuthSession::load_user_info`] refreshes afterwards.
    pub fn restore(&self) -> bool {
        let token_ok = self
            .storage
            .token()
            .map(|t| !token_expired(&t, chrono::Utc::now().timestamp()))
            .unwrap_or(false);

        match (token_ok, self.storage.user()) {
            (true, Some(user)) => {
                tracing::debug!(user_id = user.user_id, "Restored cached session");
                self.state.send_replace(SessionState::Authenticated(user));
                true
            }
            _ => false,
        }
    }

    /// Log in, load the full profile and apply the user's preferences.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let previous = self.state.send_replace(SessionState::Authenticating);

        let auth = match self.api.login(&request).await {
            Ok(auth) => auth,
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.state.send_replace(self.state_after_failed_login(previous));
                return Err(e);
            }
        };

        match self.establish(&auth.token).await {
            Ok(user) => {
                tracing::info!(user_id = user.user_id, "Logged in");
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load profile after login");
                self.clear_local_session();
                self.state.send_replace(SessionState::Anonymous);
                Err(e)
            }
        }
    }

    /// Store the token, fetch the profile and publish `Authenticated`.
    async fn establish(&self, token: &str) -> Result<AuthUser> {
        self.storage.set_token(token)?;
        let user = self.api.get_me().await?;
        self.accept_user(user.clone())?;
        Ok(user)
    }

    /// Create an account. The caller logs in separately afterwards.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        request.validate()?;

        match self.api.register(request).await {
            Ok(()) => {
                tracing::info!("Account registered");
                Ok(())
            }
            Err(AppError::EmailTaken) => {
                tracing::info!("Registration rejected: email already taken");
                Err(AppError::EmailTaken)
            }
            Err(e) => Err(e),
        }
    }

    /// Send a partial settings update; the returned user replaces the session user.
    pub async fn update_user_profile(&self, patch: &UserSettingsPatch) -> Result<AuthUser> {
        self.require_user()?;
        patch.validate()?;

        let user = self.api.update_settings(patch).await?;

        // A logout that completed while the request was in flight wins.
        if !self.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }
        self.accept_user(user.clone())?;
        tracing::info!(user_id = user.user_id, "Profile updated");
        Ok(user)
    }

    /// Clear token, user, cached public profile and achievements; reset theme.
    pub fn logout(&self) -> Result<()> {
        let mut first_error = None;
        let results = [
            self.storage.clear_token(),
            self.storage.clear_user(),
            self.storage.clear_public_profile(),
            self.storage.clear_unlocked_achievements(),
            self.preferences.reset_theme(),
        ];
        for result in results {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to clear session state");
                first_error.get_or_insert(e);
            }
        }

        self.state.send_replace(SessionState::Anonymous);
        tracing::info!("Logged out");

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Bootstrap: refresh the user behind the stored token.
    ///
    /// Returns `Ok(None)` without a network call when there is no usable
    /// token. Any failure clears the stale cached user.
    pub async fn load_user_info(&self) -> Result<Option<AuthUser>> {
        let token = match self.storage.token() {
            Some(token) if !token_expired(&token, chrono::Utc::now().timestamp()) => token,
            Some(_) => {
                tracing::info!("Stored token expired");
                self.clear_local_session();
                self.state.send_replace(SessionState::Anonymous);
                return Ok(None);
            }
            None => {
                if let Err(e) = self.storage.clear_user() {
                    tracing::warn!(error = %e, "Failed to clear cached user");
                }
                self.state.send_replace(SessionState::Anonymous);
                return Ok(None);
            }
        };

        match self.api.get_me().await {
            // The token may have been replaced by a login while we waited.
            Ok(_) if self.storage.token().as_deref() != Some(token.as_str()) => {
                Ok(self.current_user())
            }
            Ok(user) => {
                self.accept_user(user.clone())?;
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load user info");
                if e.is_auth_error() {
                    self.clear_local_session();
                } else if let Err(err) = self
                    .storage
                    .clear_user()
                    .and_then(|_| self.storage.clear_public_profile())
                {
                    tracing::warn!(error = %err, "Failed to clear cached user");
                }
                self.state.send_replace(SessionState::Anonymous);
                Err(e)
            }
        }
    }

    /// Mutate the session user locally and refresh its cache.
    ///
    /// Returns false when nobody is logged in.
    pub fn patch_user<F>(&self, f: F) -> Result<bool>
    where
        F: FnOnce(&mut AuthUser),
    {
        let mut patched = None;
        self.state.send_if_modified(|state| match state {
            SessionState::Authenticated(user) => {
                f(user);
                patched = Some(user.clone());
                true
            }
            _ => false,
        });

        match patched {
            Some(user) => {
                self.storage.set_user(&user)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ─── Helpers ─────────────────────────────────────────────

    /// An existing session survives a failed re-login only if nothing else
    /// moved the state and its token is still stored.
    fn state_after_failed_login(&self, previous: SessionState) -> SessionState {
        let untouched = matches!(*self.state.borrow(), SessionState::Authenticating);
        match previous {
            SessionState::Authenticated(user) if untouched && self.storage.token().is_some() => {
                SessionState::Authenticated(user)
            }
            _ => SessionState::Anonymous,
        }
    }

    fn accept_user(&self, user: AuthUser) -> Result<()> {
        self.preferences.apply(user.theme, user.language)?;
        self.storage.set_user(&user)?;
        self.storage.set_public_profile(&PublicProfile::from(&user))?;
        self.state.send_replace(SessionState::Authenticated(user));
        Ok(())
    }

    /// Drop the token and every cached user artifact (best effort).
    fn clear_local_session(&self) {
        for result in [
            self.storage.clear_token(),
            self.storage.clear_user(),
            self.storage.clear_public_profile(),
        ] {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Failed to clear session cache");
            }
        }
    }
}

/// Claims we read from the session token.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    exp: Option<i64>,
}

/// Whether a JWT's `exp` is at or before `now` (Unix seconds).
///
/// The signature is not checked; the backend does that. Tokens that are
/// not JWTs, or carry no `exp`, are treated as live.
pub fn token_expired(token: &str, now: i64) -> bool {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data.claims.exp.is_some_and(|exp| exp <= now),
        Err(_) => false,
    }
}
