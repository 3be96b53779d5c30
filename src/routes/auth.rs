// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, logout and session routes.

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::SessionUser;
use crate::session::{self, CookiePolicy, CookieSession, SessionSnapshot};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout).get(logout))
        .route("/api/session", get(current_session))
}

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    /// User object as returned by the backend.
    pub user: Value,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    pub user: Option<SessionUser>,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

fn cookie_policy(state: &AppState) -> CookiePolicy {
    CookiePolicy {
        secure: state.config.secure_cookies,
    }
}

/// Check credentials with the backend and open a cookie session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let request: LoginRequest = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Cuerpo JSON inválido".to_string()))?;

    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(AppError::BadRequest("Credenciales requeridas".to_string())),
    };

    let success = state.coffee.login(&email, &password).await?;

    let token = success.token().unwrap_or_else(|| {
        tracing::debug!("Backend returned no token, minting fallback session token");
        session::fallback_token(&email, chrono::Utc::now().timestamp_millis())
    });

    let snapshot = SessionSnapshot {
        user_id: success.user_id(),
        login: Some(success.login().unwrap_or_else(|| email.clone())),
    };

    if snapshot.user_id.is_none() {
        tracing::warn!("Backend login response carried no user id");
    }
    tracing::info!(user_id = ?snapshot.user_id, "Login successful");

    let mut store = CookieSession::new(jar, cookie_policy(&state));
    session::establish(&mut store, token, &snapshot);

    Ok((
        store.into_jar(),
        Json(LoginResponse {
            ok: true,
            user: success.user,
        }),
    ))
}

/// Report the user held in the session snapshot. Always 200.
async fn current_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Json<SessionResponse> {
    let store = CookieSession::new(jar, cookie_policy(&state));
    let user = session::current_user(&store);

    Json(SessionResponse {
        ok: user.is_some(),
        user,
    })
}

/// Clear every session cookie. No backend call.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<OkResponse>) {
    let mut store = CookieSession::new(jar, cookie_policy(&state));
    session::clear_all(&mut store);

    tracing::debug!("Session cleared");

    (store.into_jar(), Json(OkResponse { ok: true }))
}
