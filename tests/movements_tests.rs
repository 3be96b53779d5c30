// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Movement relay tests against a fake coffee backend.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use coffee_control::models::balance_from_payload;
use serde_json::json;
use tower::ServiceExt;

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_balance_is_relayed() {
    let base = common::spawn_fake_backend().await;
    let app = common::create_test_app_with_backend(&base);

    let response = app
        .oneshot(get("/api/coffee/users/42/movements"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );

    let payload = common::body_json(response).await;
    assert_eq!(payload["balance_Coffees"], json!("7"));
    assert_eq!(balance_from_payload(&payload), Some(7.0));
}

#[tokio::test]
async fn test_empty_user_id_is_bad_request() {
    let app = common::create_test_app(coffee_control::config::Config::default());

    let response = app
        .oneshot(get("/api/coffee/users//movements"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::body_json(response).await,
        json!({"ok": false, "error": "userId requerido"})
    );
}

#[tokio::test]
async fn test_unknown_movement_path_is_not_found() {
    let app = common::create_test_app(coffee_control::config::Config::default());

    let response = app
        .oneshot(get("/api/coffee/users/42/balance"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upstream_error_status_is_relayed() {
    let base = common::spawn_fake_backend().await;
    let app = common::create_test_app_with_backend(&base);

    let response = app
        .oneshot(get("/api/coffee/users/13/movements"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        common::body_json(response).await,
        json!({"message": "user not found"})
    );
}

#[tokio::test]
async fn test_plain_text_balance_is_relayed_as_json_string() {
    let base = common::spawn_fake_backend().await;
    let app = common::create_test_app_with_backend(&base);

    let response = app
        .oneshot(get("/api/coffee/users/99/movements"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!("sin datos"));
}

#[tokio::test]
async fn test_unreachable_backend_on_list_is_bad_gateway() {
    let base = common::unreachable_base().await;
    let app = common::create_test_app_with_backend(&base);

    let response = app
        .oneshot(get("/api/coffee/users/42/movements"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload = common::body_json(response).await;
    assert_eq!(payload["ok"], json!(false));
    assert_eq!(
        payload["error"],
        json!("Fallo al contactar con el servidor externo")
    );
}

#[tokio::test]
async fn test_create_movement_forwards_body_and_status() {
    let base = common::spawn_fake_backend().await;
    let app = common::create_test_app_with_backend(&base);

    let movement = json!({
        "user_id": 7,
        "movement_type_id": 2,
        "amount": 1,
        "bet_id": null
    });

    let response = app
        .oneshot(common::json_post(
            "/api/coffee/movements/create",
            movement.clone(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = common::body_json(response).await;
    assert_eq!(payload["id"], json!(501));
    assert_eq!(payload["received"], movement);
}

#[tokio::test]
async fn test_create_movement_relays_plain_text() {
    let base = common::spawn_fake_backend().await;
    let app = common::create_test_app_with_backend(&base);

    let response = app
        .oneshot(common::json_post(
            "/api/coffee/movements/create",
            json!({"user_id": 7, "movement_type_id": 1, "amount": 0, "bet_id": 3}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(common::body_text(response).await, "amount must be positive");
}

#[tokio::test]
async fn test_create_movement_unknown_type_is_still_forwarded() {
    let base = common::spawn_fake_backend().await;
    let app = common::create_test_app_with_backend(&base);

    let response = app
        .oneshot(common::json_post(
            "/api/coffee/movements/create",
            json!({"user_id": 7, "movement_type_id": 9, "amount": 5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_movement_unreachable_backend() {
    let base = common::unreachable_base().await;
    let app = common::create_test_app_with_backend(&base);

    let response = app
        .oneshot(common::json_post(
            "/api/coffee/movements/create",
            json!({"user_id": 7, "movement_type_id": 2, "amount": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::body_json(response).await,
        json!({"ok": false, "error": "Fallo al contactar con el servicio."})
    );
}
