// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coffee movement relays.

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{balance_from_payload, MovementType};
use crate::services::{RelayBody, Relayed};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/coffee/movements/create", post(create_movement))
        .route("/api/coffee/users/{*rest}", get(list_movements))
}

/// Forward a movement to the backend and relay whatever it answers.
///
/// Amounts and balances are not checked here; the backend owns that.
async fn create_movement(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Relayed> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Cuerpo JSON inválido".to_string()))?;

    tracing::info!(
        user_id = ?payload.get("user_id"),
        movement_type = MovementType::from_payload(&payload).map(MovementType::as_str),
        "Forwarding movement"
    );

    let relayed = state.coffee.create_movement(&payload).await?;

    tracing::info!(status = relayed.status.as_u16(), "Movement relayed");
    Ok(relayed)
}

/// Relay `/api/coffee/users/{userId}/movements`.
///
/// Matched as a catch-all so that an empty id gets a 400 instead of a 404.
async fn list_movements(
    State(state): State<Arc<AppState>>,
    Path(rest): Path<String>,
) -> Result<Relayed> {
    let user_id = parse_movements_path(&rest)?;

    let relayed = state.coffee.list_movements(user_id).await?;

    if let RelayBody::Json(ref body) = relayed.body {
        if let Some(balance) = balance_from_payload(body) {
            tracing::debug!(user_id, balance, "Balance relayed");
        }
    }

    Ok(relayed)
}

/// Extract the user id from `"{userId}/movements"`.
fn parse_movements_path(rest: &str) -> Result<&str> {
    let user_id = rest
        .strip_suffix("/movements")
        .ok_or_else(|| AppError::NotFound(format!("/api/coffee/users/{}", rest)))?;

    if user_id.contains('/') {
        return Err(AppError::NotFound(format!("/api/coffee/users/{}", rest)));
    }

    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::BadRequest("userId requerido".to_string()));
    }

    Ok(user_id)
}
