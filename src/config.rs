//! Client configuration loaded from environment variables.

use crate::models::Language;
use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL including the `/api` base path
    pub api_base_url: String,
    /// File that backs the persisted client state
    pub storage_path: PathBuf,
    /// UI language used until the user picks one
    pub default_language: Language,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            storage_path: PathBuf::from(".beanly/storage.json"),
            default_language: Language::En,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("BEANLY_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid("BEANLY_API_URL", api_base_url));
        }

        let default_language = match env::var("BEANLY_LANG") {
            Ok(v) => Language::parse(v.trim())
                .ok_or_else(|| ConfigError::Invalid("BEANLY_LANG", v.clone()))?,
            Err(_) => Language::En,
        };

        Ok(Self {
            api_base_url,
            storage_path: env::var("BEANLY_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".beanly/storage.json")),
            default_language,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
