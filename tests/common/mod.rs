// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    extract::{Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use coffee_control::config::Config;
use coffee_control::routes::create_router;
use coffee_control::AppState;
use serde_json::{json, Value};
use std::sync::Arc;

/// Create a test app for the given configuration.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> axum::Router {
    create_router(Arc::new(AppState::from_config(config)))
}

/// Create a test app whose coffee backend is `base`.
#[allow(dead_code)]
pub fn create_test_app_with_backend(base: &str) -> axum::Router {
    create_test_app(Config {
        coffee_api_base: base.to_string(),
        ..Config::default()
    })
}

/// Serve `router` on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("upstream server");
    });
    format!("http://{}", addr)
}

/// Base URL of a port with nothing listening on it.
#[allow(dead_code)]
pub async fn unreachable_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

/// Spawn the fake coffee backend and return its base URL.
#[allow(dead_code)]
pub async fn spawn_fake_backend() -> String {
    spawn_upstream(fake_backend()).await
}

/// Stand-in for the coffee backend and the user directory.
///
/// - `ana@example.com` / `secret` logs in with a token
/// - `bea@example.com` / `secret` logs in without a token, user nested
/// - `ghost@example.com` logs in but the body is not JSON
/// - `locked@example.com` is refused with a plain-text 403
/// - anything else is refused with a JSON 401 carrying a message
#[allow(dead_code)]
pub fn fake_backend() -> Router {
    Router::new()
        .route("/users/login", post(fake_login))
        .route("/coffee/movements/create", post(fake_create_movement))
        .route("/coffee/users/{id}/movements", get(fake_movements))
        .route("/users/list", get(fake_user_list))
}

async fn fake_login(Json(body): Json<Value>) -> Response {
    let login = body["login"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match (login, password) {
        ("ana@example.com", "secret") => Json(json!({
            "id": 7,
            "login": "ana",
            "name": "Ana López",
            "token": "upstream-token"
        }))
        .into_response(),
        ("bea@example.com", "secret") => {
            Json(json!({"user": {"id": 8, "login": "bea"}})).into_response()
        }
        ("ghost@example.com", _) => (StatusCode::OK, "welcome").into_response(),
        ("locked@example.com", _) => (StatusCode::FORBIDDEN, "forbidden").into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Usuario o contraseña incorrectos"})),
        )
            .into_response(),
    }
}

async fn fake_create_movement(Json(body): Json<Value>) -> Response {
    if body["amount"] == json!(0) {
        return (StatusCode::UNPROCESSABLE_ENTITY, "amount must be positive").into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({"id": 501, "received": body})),
    )
        .into_response()
}

async fn fake_movements(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "42" => Json(json!({"balance_Coffees": "7", "movements": []})).into_response(),
        "99" => (StatusCode::OK, "sin datos").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "user not found"})),
        )
            .into_response(),
    }
}

async fn fake_user_list(Query(params): Query<Vec<(String, String)>>) -> Response {
    if params.iter().any(|(k, v)| k == "name" && v == "boom") {
        return (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance").into_response();
    }
    if params.iter().any(|(k, v)| k == "name" && v == "garbage") {
        return (StatusCode::OK, "<html>").into_response();
    }
    Json(json!({"query": params})).into_response()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("UTF-8 body")
}

/// All `Set-Cookie` header values of a response.
#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` value for `name`, panicking if absent.
#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

/// `name=value` part of a `Set-Cookie` header, usable as a `Cookie` header.
#[allow(dead_code)]
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn json_post(uri: &str, body: Value) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
