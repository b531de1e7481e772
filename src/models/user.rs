//! User, session and profile models.

use crate::models::{Language, Theme};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// The authenticated user as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub default_city: Option<String>,
    #[serde(default)]
    pub favorite_cafe_ids: Vec<i64>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub push_notifications: bool,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub check_in_count: u32,
}

impl AuthUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Public part of the profile, cached under `publicUserProfile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: Option<String>,
    pub default_city: Option<String>,
}

impl From<&AuthUser> for PublicProfile {
    fn from(user: &AuthUser) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            photo_url: user.photo_url.clone(),
            default_city: user.default_city.clone(),
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

/// Token issued by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Partial update sent to `PATCH /users/settings`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "First name must not be empty"))]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "Last name must not be empty"))]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Photo must be a URL"))]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_notifications: Option<bool>,
}

/// At least 8 characters with both letters and digits.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_letter && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("weak_password").with_message(
            "Password needs at least 8 characters with letters and digits".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "Olena".to_string(),
            last_name: "Koval".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register("olena@beanly.test", "latte2024").validate().is_ok());

        let errors = register("not-an-email", "latte2024").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let errors = register("olena@beanly.test", "short1").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let errors = register("olena@beanly.test", "onlyletters").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_settings_patch_skips_unset_fields() {
        let patch = UserSettingsPatch {
            theme: Some(Theme::Dark),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"theme":"dark"}"#);
        assert!(patch.validate().is_ok());

        let bad = UserSettingsPatch {
            first_name: Some(String::new()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_auth_user_defaults() {
        let user: AuthUser = serde_json::from_str(
            r#"{"userId": 5, "firstName": "Taras", "lastName": "", "email": "t@beanly.test"}"#,
        )
        .unwrap();
        assert!(user.favorite_cafe_ids.is_empty());
        assert_eq!(user.theme, Theme::Light);
        assert_eq!(user.display_name(), "Taras");
        assert_eq!(PublicProfile::from(&user).user_id, 5);
    }
}
