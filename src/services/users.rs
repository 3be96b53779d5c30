// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User directory listing.
//!
//! With a backend configured, listing requests are proxied to
//! `{base}/users/list`. Without one, a small fixed catalogue is served so the
//! demo pages work offline.

use crate::error::AppError;
use crate::models::DirectoryUser;
use axum::http::header;
use serde_json::Value;

/// Query keys that are normalized to integer text before forwarding.
const INTEGER_PARAMS: [&str; 2] = ["page", "rowsPerPage"];

/// Catalogue served when no directory backend is configured.
const MOCK_USERS: [(i64, &str, &str, &str); 4] = [
    (1, "jdoe", "John Doe", "john@example.com"),
    (2, "maria", "María Pérez", "maria@example.com"),
    (3, "pablo", "Pablo García", "pablo@example.com"),
    (4, "laura", "Laura Ruiz", "laura@example.com"),
];

/// Where user listings come from.
#[derive(Clone)]
pub enum UserDirectory {
    Upstream {
        http: reqwest::Client,
        base_url: String,
    },
    Mock,
}

impl UserDirectory {
    /// Proxy to `base_url` when given, otherwise serve the mock catalogue.
    pub fn new(base_url: Option<String>) -> Self {
        match base_url {
            Some(base_url) => UserDirectory::Upstream {
                http: reqwest::Client::new(),
                base_url,
            },
            None => UserDirectory::Mock,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, UserDirectory::Mock)
    }

    /// List users for the given query parameters.
    pub async fn list(&self, params: Vec<(String, String)>) -> Result<Value, AppError> {
        let params = normalize_pagination(params);

        match self {
            UserDirectory::Upstream { http, base_url } => {
                let url = format!("{}/users/list", base_url);

                let response = http
                    .get(&url)
                    .header(header::ACCEPT, "application/json")
                    .query(&params)
                    .send()
                    .await
                    .map_err(|e| {
                        tracing::warn!(error = %e, "User list request to backend failed");
                        AppError::Unreachable("Network error contacting backend".to_string())
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    tracing::warn!(status = status.as_u16(), "User list backend returned error");
                    return Err(AppError::UpstreamStatus {
                        status: status.as_u16(),
                        body,
                    });
                }

                Ok(response
                    .json::<Value>()
                    .await
                    .unwrap_or_else(|_| Value::Array(Vec::new())))
            }
            UserDirectory::Mock => {
                let name = params
                    .iter()
                    .find(|(key, _)| key == "name")
                    .map(|(_, value)| value.to_lowercase())
                    .unwrap_or_default();

                let users = mock_users(&name);
                tracing::debug!(filter = %name, count = users.len(), "Serving mock user list");

                serde_json::to_value(users).map_err(|e| AppError::Internal(e.into()))
            }
        }
    }
}

/// Mock catalogue entries whose name or login contains `needle` (lowercase).
/// An empty needle returns every entry.
pub fn mock_users(needle: &str) -> Vec<DirectoryUser> {
    MOCK_USERS
        .iter()
        .map(|(id, login, name, email)| DirectoryUser {
            id: *id,
            login: Some(login.to_string()),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            status: None,
            role: None,
        })
        .filter(|user| needle.is_empty() || user.matches_name(needle))
        .collect()
}

/// Rewrite `page` and `rowsPerPage` as plain integers when they hold an
/// integral number. Anything else passes through untouched.
pub fn normalize_pagination(params: Vec<(String, String)>) -> Vec<(String, String)> {
    params
        .into_iter()
        .map(|(key, value)| {
            if INTEGER_PARAMS.contains(&key.as_str()) {
                if let Some(n) = parse_integral(&value) {
                    return (key, n.to_string());
                }
            }
            (key, value)
        })
        .collect()
}

fn parse_integral(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    let f = trimmed.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
