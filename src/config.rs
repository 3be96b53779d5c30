// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Upstream used for login and coffee movements when `COFFEE_API_BASE` is unset.
pub const DEFAULT_COFFEE_API_BASE: &str = "https://mjgest.mjdevs.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Base URL of the coffee backend (login, movements)
    pub coffee_api_base: String,
    /// Base URL of the user directory backend. `None` serves the mock catalogue.
    pub users_backend_url: Option<String>,
    /// Mark session cookies `Secure` (production only)
    pub secure_cookies: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:3000".to_string(),
            coffee_api_base: DEFAULT_COFFEE_API_BASE.to_string(),
            users_backend_url: None,
            secure_cookies: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            None => 8080,
        };

        let coffee_api_base = match lookup("COFFEE_API_BASE") {
            Some(raw) if !raw.trim().is_empty() => {
                normalize_base_url("COFFEE_API_BASE", &raw)?
            }
            _ => DEFAULT_COFFEE_API_BASE.to_string(),
        };

        let users_backend_url = match lookup("BACKEND_BASE_URL") {
            Some(raw) if !raw.trim().is_empty() => {
                Some(normalize_base_url("BACKEND_BASE_URL", &raw)?)
            }
            _ => None,
        };

        Ok(Self {
            port,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            coffee_api_base,
            users_backend_url,
            secure_cookies: lookup("NODE_ENV").as_deref() == Some("production"),
        })
    }
}

/// Trim whitespace and trailing slashes, and require an http(s) scheme.
fn normalize_base_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid(name, raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
