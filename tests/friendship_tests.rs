// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friendship lifecycle tests over the API.
//!
//! These tests verify that:
//! 1. Requests move pending -> accepted, or are deleted, never anything else
//! 2. Only the receiver accepts; only the two parties may delete
//! 3. Crossing requests are resolved into a single accepted friendship

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn authed(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: &str,
    payload: Option<serde_json::Value>,
) -> axum::response::Response {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    let request = match payload {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

#[tokio::test]
async fn test_request_accept_makes_friends_on_both_sides() {
    let (app, _state) = common::create_test_app();
    let (alice_token, alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;
    let (bob_token, bob_id) =
        common::register_member(&app, "bob@example.com", "bob", "pw-bob-1234").await;

    // Alice sends
    let response = authed(
        &app,
        "POST",
        "/api/friends/requests",
        &alice_token,
        Some(json!({"member_id": bob_id})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let request_view = common::read_json(response).await;
    assert_eq!(request_view["sender_id"].as_u64().unwrap(), alice_id);
    assert_eq!(request_view["receiver_id"].as_u64().unwrap(), bob_id);
    assert_eq!(request_view["status"], "pending");
    let request_id = request_view["id"].as_u64().unwrap();

    // Bob sees it incoming; Alice sees it outgoing
    let bob_list = common::read_json(
        authed(&app, "GET", "/api/friends/requests", &bob_token, None).await,
    )
    .await;
    assert_eq!(bob_list["incoming"].as_array().unwrap().len(), 1);
    assert_eq!(bob_list["outgoing"].as_array().unwrap().len(), 0);

    let alice_list = common::read_json(
        authed(&app, "GET", "/api/friends/requests", &alice_token, None).await,
    )
    .await;
    assert_eq!(alice_list["incoming"].as_array().unwrap().len(), 0);
    assert_eq!(alice_list["outgoing"].as_array().unwrap().len(), 1);

    // Nobody is friends yet while the request is pending
    let alice_friends = common::read_json(
        authed(&app, "GET", "/api/friends", &alice_token, None).await,
    )
    .await;
    assert_eq!(alice_friends.as_array().unwrap().len(), 0);

    // Bob accepts
    let accept = authed(
        &app,
        "POST",
        &format!("/api/friends/requests/{}/accept", request_id),
        &bob_token,
        None,
    )
    .await;
    assert_eq!(accept.status(), StatusCode::NO_CONTENT);

    // Both sides now list each other
    let alice_friends = common::read_json(
        authed(&app, "GET", "/api/friends", &alice_token, None).await,
    )
    .await;
    assert_eq!(alice_friends[0]["username"], "bob");

    let bob_friends = common::read_json(
        authed(&app, "GET", "/api/friends", &bob_token, None).await,
    )
    .await;
    assert_eq!(bob_friends[0]["username"], "alice");

    // No pending requests remain
    let bob_list = common::read_json(
        authed(&app, "GET", "/api/friends/requests", &bob_token, None).await,
    )
    .await;
    assert_eq!(bob_list["incoming"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_only_receiver_may_accept() {
    let (app, _state) = common::create_test_app();
    let (alice_token, _alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;
    let (_bob_token, bob_id) =
        common::register_member(&app, "bob@example.com", "bob", "pw-bob-1234").await;
    let (carol_token, _carol_id) =
        common::register_member(&app, "carol@example.com", "carol", "pw-carol-12").await;

    let request_view = common::read_json(
        authed(
            &app,
            "POST",
            "/api/friends/requests",
            &alice_token,
            Some(json!({"member_id": bob_id})),
        )
        .await,
    )
    .await;
    let request_id = request_view["id"].as_u64().unwrap();
    let accept_uri = format!("/api/friends/requests/{}/accept", request_id);

    // The sender cannot accept their own request
    let by_sender = authed(&app, "POST", &accept_uri, &alice_token, None).await;
    assert_eq!(by_sender.status(), StatusCode::FORBIDDEN);
    let body = common::read_json(by_sender).await;
    assert_eq!(body["error"], "forbidden");

    // A third party cannot accept it either
    let by_stranger = authed(&app, "POST", &accept_uri, &carol_token, None).await;
    assert_eq!(by_stranger.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_receiver_declines_and_pair_can_start_over() {
    let (app, _state) = common::create_test_app();
    let (alice_token, _alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;
    let (bob_token, bob_id) =
        common::register_member(&app, "bob@example.com", "bob", "pw-bob-1234").await;

    let request_view = common::read_json(
        authed(
            &app,
            "POST",
            "/api/friends/requests",
            &alice_token,
            Some(json!({"member_id": bob_id})),
        )
        .await,
    )
    .await;
    let request_id = request_view["id"].as_u64().unwrap();

    let decline = authed(
        &app,
        "DELETE",
        &format!("/api/friends/requests/{}", request_id),
        &bob_token,
        None,
    )
    .await;
    assert_eq!(decline.status(), StatusCode::NO_CONTENT);

    // No friendship resulted and the record is gone
    let friends = common::read_json(
        authed(&app, "GET", "/api/friends", &alice_token, None).await,
    )
    .await;
    assert_eq!(friends.as_array().unwrap().len(), 0);

    // Alice may ask again
    let again = authed(
        &app,
        "POST",
        "/api/friends/requests",
        &alice_token,
        Some(json!({"member_id": bob_id})),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_sender_cancels_own_request() {
    let (app, _state) = common::create_test_app();
    let (alice_token, _alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;
    let (bob_token, bob_id) =
        common::register_member(&app, "bob@example.com", "bob", "pw-bob-1234").await;

    let request_view = common::read_json(
        authed(
            &app,
            "POST",
            "/api/friends/requests",
            &alice_token,
            Some(json!({"member_id": bob_id})),
        )
        .await,
    )
    .await;
    let request_id = request_view["id"].as_u64().unwrap();

    let cancel = authed(
        &app,
        "DELETE",
        &format!("/api/friends/requests/{}", request_id),
        &alice_token,
        None,
    )
    .await;
    assert_eq!(cancel.status(), StatusCode::NO_CONTENT);

    let bob_list = common::read_json(
        authed(&app, "GET", "/api/friends/requests", &bob_token, None).await,
    )
    .await;
    assert_eq!(bob_list["incoming"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_stranger_may_not_delete_request() {
    let (app, _state) = common::create_test_app();
    let (alice_token, _alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;
    let (_bob_token, bob_id) =
        common::register_member(&app, "bob@example.com", "bob", "pw-bob-1234").await;
    let (carol_token, _carol_id) =
        common::register_member(&app, "carol@example.com", "carol", "pw-carol-12").await;

    let request_view = common::read_json(
        authed(
            &app,
            "POST",
            "/api/friends/requests",
            &alice_token,
            Some(json!({"member_id": bob_id})),
        )
        .await,
    )
    .await;
    let request_id = request_view["id"].as_u64().unwrap();

    let response = authed(
        &app,
        "DELETE",
        &format!("/api/friends/requests/{}", request_id),
        &carol_token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_and_already_friends_conflict() {
    let (app, _state) = common::create_test_app();
    let (alice_token, alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;
    let (bob_token, bob_id) =
        common::register_member(&app, "bob@example.com", "bob", "pw-bob-1234").await;

    let request_view = common::read_json(
        authed(
            &app,
            "POST",
            "/api/friends/requests",
            &alice_token,
            Some(json!({"member_id": bob_id})),
        )
        .await,
    )
    .await;
    let request_id = request_view["id"].as_u64().unwrap();

    // Same direction, still pending
    let duplicate = authed(
        &app,
        "POST",
        "/api/friends/requests",
        &alice_token,
        Some(json!({"member_id": bob_id})),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    authed(
        &app,
        "POST",
        &format!("/api/friends/requests/{}/accept", request_id),
        &bob_token,
        None,
    )
    .await;

    // Already friends: both directions conflict
    let from_alice = authed(
        &app,
        "POST",
        "/api/friends/requests",
        &alice_token,
        Some(json!({"member_id": bob_id})),
    )
    .await;
    assert_eq!(from_alice.status(), StatusCode::CONFLICT);

    let from_bob = authed(
        &app,
        "POST",
        "/api/friends/requests",
        &bob_token,
        Some(json!({"member_id": alice_id})),
    )
    .await;
    assert_eq!(from_bob.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_self_request_rejected() {
    let (app, _state) = common::create_test_app();
    let (alice_token, alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;

    let response = authed(
        &app,
        "POST",
        "/api/friends/requests",
        &alice_token,
        Some(json!({"member_id": alice_id})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_request_to_unknown_member_is_not_found() {
    let (app, _state) = common::create_test_app();
    let (alice_token, _alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;

    let response = authed(
        &app,
        "POST",
        "/api/friends/requests",
        &alice_token,
        Some(json!({"member_id": 9999})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_accept_unknown_request_is_not_found() {
    let (app, _state) = common::create_test_app();
    let (alice_token, _alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;

    let response = authed(
        &app,
        "POST",
        "/api/friends/requests/9999/accept",
        &alice_token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_crossing_requests_resolve_into_one_friendship() {
    let (app, _state) = common::create_test_app();
    let (alice_token, alice_id) =
        common::register_member(&app, "alice@example.com", "alice", "pw-alice-123").await;
    let (bob_token, bob_id) =
        common::register_member(&app, "bob@example.com", "bob", "pw-bob-1234").await;

    // Both ask each other before either notices
    let from_alice = common::read_json(
        authed(
            &app,
            "POST",
            "/api/friends/requests",
            &alice_token,
            Some(json!({"member_id": bob_id})),
        )
        .await,
    )
    .await;
    let from_bob = authed(
        &app,
        "POST",
        "/api/friends/requests",
        &bob_token,
        Some(json!({"member_id": alice_id})),
    )
    .await;
    assert_eq!(from_bob.status(), StatusCode::CREATED);

    // Bob accepts Alice's request; his own crossing request is resolved too
    let accept = authed(
        &app,
        "POST",
        &format!(
            "/api/friends/requests/{}/accept",
            from_alice["id"].as_u64().unwrap()
        ),
        &bob_token,
        None,
    )
    .await;
    assert_eq!(accept.status(), StatusCode::NO_CONTENT);

    // Exactly one friendship each, no pending leftovers anywhere
    let alice_friends = common::read_json(
        authed(&app, "GET", "/api/friends", &alice_token, None).await,
    )
    .await;
    assert_eq!(alice_friends.as_array().unwrap().len(), 1);

    for token in [&alice_token, &bob_token] {
        let list = common::read_json(
            authed(&app, "GET", "/api/friends/requests", token, None).await,
        )
        .await;
        assert_eq!(list["incoming"].as_array().unwrap().len(), 0);
        assert_eq!(list["outgoing"].as_array().unwrap().len(), 0);
    }
}
