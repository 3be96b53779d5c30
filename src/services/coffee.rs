// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coffee backend client.
//!
//! Handles:
//! - Credential checks against `/users/login`
//! - Movement creation (recharges, consumptions, bets)
//! - Movement/balance listing for a user
//!
//! No retries: every failure is returned to the caller as-is.

use crate::error::AppError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

const ACCEPT_JSON: &str = "application/json";
const ACCEPT_JSON_OR_TEXT: &str = "application/json, text/plain;q=0.9,*/*;q=0.8";

/// Body of an upstream response, relayed unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayBody {
    Json(Value),
    /// Upstream answered with something that is not JSON.
    Text(String),
}

/// Upstream response ready to be handed back to the browser.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: StatusCode,
    pub body: RelayBody,
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        match self.body {
            RelayBody::Json(value) => (self.status, Json(value)).into_response(),
            RelayBody::Text(text) => (
                self.status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                )],
                text,
            )
                .into_response(),
        }
    }
}

/// Accepted login as reported by the backend.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    /// User object exactly as the backend returned it.
    pub user: Value,
}

impl LoginSuccess {
    /// Bearer token handed out by the backend, if any.
    pub fn token(&self) -> Option<String> {
        ["token", "accessToken"]
            .iter()
            .filter_map(|key| self.user.get(*key).and_then(Value::as_str))
            .find(|token| !token.is_empty())
            .map(str::to_string)
    }

    /// Numeric user id, either top-level or nested under `user`.
    pub fn user_id(&self) -> Option<i64> {
        self.user
            .get("id")
            .and_then(Value::as_i64)
            .or_else(|| self.nested("id").and_then(Value::as_i64))
    }

    /// Login name, either top-level or nested under `user`.
    pub fn login(&self) -> Option<String> {
        self.user
            .get("login")
            .and_then(Value::as_str)
            .or_else(|| self.nested("login").and_then(Value::as_str))
            .map(str::to_string)
    }

    fn nested(&self, key: &str) -> Option<&Value> {
        self.user.get("user").and_then(|inner| inner.get(key))
    }
}

/// Coffee backend API client.
#[derive(Clone)]
pub struct CoffeeClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoffeeClient {
    /// Create a client for the backend at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Check credentials with the backend.
    ///
    /// The backend expects the email under the `login` key.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, AppError> {
        let url = format!("{}/users/login", self.base_url);

        let body = serde_json::json!({
            "login": email,
            "password": password,
        });

        let response = self
            .http
            .post(&url)
            .header(header::ACCEPT, ACCEPT_JSON)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Login request to backend failed");
                AppError::Unreachable("Error de red".to_string())
            })?;

        let status = response.status();
        let user = response
            .json::<Value>()
            .await
            .ok()
            .filter(|v| !v.is_null());

        match user {
            Some(user) if status.is_success() => Ok(LoginSuccess { user }),
            user => {
                let message = user
                    .as_ref()
                    .and_then(|u| u.get("message"))
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or("Login inválido")
                    .to_string();

                // A 2xx with an unusable body still counts as a failed login.
                let status = if status.is_success() {
                    StatusCode::UNAUTHORIZED
                } else {
                    status
                };

                tracing::info!(status = status.as_u16(), "Login rejected by backend");
                Err(AppError::Rejected { status, message })
            }
        }
    }

    /// Forward a create-movement body unchanged.
    pub async fn create_movement(&self, payload: &Value) -> Result<Relayed, AppError> {
        let url = format!("{}/coffee/movements/create", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(header::ACCEPT, ACCEPT_JSON_OR_TEXT)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Create-movement request to backend failed");
                AppError::Unreachable("Fallo al contactar con el servicio.".to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Unreachable(format!("Fallo al leer la respuesta: {}", e)))?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => RelayBody::Json(value),
            Err(_) => RelayBody::Text(text),
        };

        Ok(Relayed { status, body })
    }

    /// Fetch the movements (and balance) of a user.
    ///
    /// A non-JSON body is relayed as a JSON string.
    pub async fn list_movements(&self, user_id: &str) -> Result<Relayed, AppError> {
        let url = format!(
            "{}/coffee/users/{}/movements",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, user_id, "Movements request to backend failed");
                AppError::BadGateway("Fallo al contactar con el servidor externo".to_string())
            })?;

        let upstream_status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, user_id, "Movements response could not be read");
            AppError::BadGateway("Fallo al contactar con el servidor externo".to_string())
        })?;

        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

        let status = if upstream_status.is_success() {
            StatusCode::OK
        } else {
            upstream_status
        };

        Ok(Relayed {
            status,
            body: RelayBody::Json(body),
        })
    }
}
