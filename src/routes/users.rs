// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User directory route.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/list", get(list_users))
}

/// List users (`page`, `rowsPerPage`, `name`, `status`, `rol`).
///
/// Parameters are kept in order and forwarded as received, apart from the
/// pagination pair which is normalized to integers.
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>> {
    let users = state.users.list(params).await?;
    Ok(Json(users))
}
