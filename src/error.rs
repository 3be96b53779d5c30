// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The upstream refused the request (e.g. bad credentials).
    #[error("Rejected by upstream ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// The upstream answered with a non-success status.
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream could not be reached; answered with 500.
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    /// The upstream could not be reached; answered with 502.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

impl AppError {
    /// HTTP status this error is answered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Rejected { status, .. } => *status,
            AppError::UpstreamStatus { .. } | AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Unreachable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Unreachable(msg)
            | AppError::BadGateway(msg) => ErrorResponse {
                ok: false,
                error: msg,
                status: None,
                body: None,
            },
            AppError::Rejected { message, .. } => ErrorResponse {
                ok: false,
                error: message,
                status: None,
                body: None,
            },
            AppError::UpstreamStatus {
                status: upstream,
                body,
            } => ErrorResponse {
                ok: false,
                error: "Upstream error".to_string(),
                status: Some(upstream),
                body: Some(body),
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                ErrorResponse {
                    ok: false,
                    error: "internal_error".to_string(),
                    status: None,
                    body: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
