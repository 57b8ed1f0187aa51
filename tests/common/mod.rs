// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use trailmates::config::Config;
use trailmates::db::MemberStore;
use trailmates::routes::create_router;
use trailmates::services::{AccountService, FriendshipService, GroupService, TokenService};
use trailmates::AppState;

/// Create a test app over a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = MemberStore::new();
    let tokens = TokenService::new(config.jwt_signing_key.clone(), config.token_ttl_secs);
    let accounts = AccountService::new(db.clone(), tokens.clone());
    let friendships = FriendshipService::new(db.clone());
    let groups = GroupService::new(db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        tokens,
        accounts,
        friendships,
        groups,
    });

    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Register a member through the API, returning (token, member_id).
#[allow(dead_code)]
pub async fn register_member(
    app: &axum::Router,
    email: &str,
    username: &str,
    password: &str,
) -> (String, u64) {
    let payload = json!({
        "email": email,
        "username": username,
        "password": password,
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED, "registration failed");
    let body = read_json(response).await;
    let token = body["token"].as_str().expect("token in response").to_string();
    let member_id = body["member"]["id"].as_u64().expect("member id in response");
    (token, member_id)
}
