// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friendship routes (require authentication).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthMember;
use crate::models::{Friendship, FriendshipStatus, MemberProfile};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

/// Friendship routes. The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/friends", get(list_friends))
        .route("/api/friends/requests", post(send_request).get(list_requests))
        .route("/api/friends/requests/{id}/accept", post(accept_request))
        .route("/api/friends/requests/{id}", delete(delete_request))
}

// ─── Views ───────────────────────────────────────────────────

/// A friendship record as shown to clients.
#[derive(Serialize)]
pub struct FriendRequestView {
    pub id: u64,
    pub sender_id: u64,
    pub receiver_id: u64,
    pub status: FriendshipStatus,
    pub created_at: String,
}

impl From<&Friendship> for FriendRequestView {
    fn from(friendship: &Friendship) -> Self {
        Self {
            id: friendship.id,
            sender_id: friendship.sender_id,
            receiver_id: friendship.receiver_id,
            status: friendship.status,
            created_at: format_utc_rfc3339(friendship.created_at),
        }
    }
}

/// Pending requests for the current member, split by direction.
#[derive(Serialize)]
pub struct FriendRequestsResponse {
    pub incoming: Vec<FriendRequestView>,
    pub outgoing: Vec<FriendRequestView>,
}

// ─── Handlers ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendFriendRequest {
    /// Member the request is addressed to
    pub member_id: u64,
}

/// Send a friend request to another member.
async fn send_request(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Json(request): Json<SendFriendRequest>,
) -> Result<(StatusCode, Json<FriendRequestView>)> {
    let friendship = state
        .friendships
        .send_request(member.member_id, request.member_id)
        .await?;
    Ok((StatusCode::CREATED, Json(FriendRequestView::from(&friendship))))
}

/// List pending requests involving the current member.
async fn list_requests(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
) -> Result<Json<FriendRequestsResponse>> {
    let (incoming, outgoing) = state.friendships.pending_for(member.member_id).await;
    Ok(Json(FriendRequestsResponse {
        incoming: incoming.iter().map(FriendRequestView::from).collect(),
        outgoing: outgoing.iter().map(FriendRequestView::from).collect(),
    }))
}

/// Accept a pending request addressed to the current member.
async fn accept_request(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Path(friendship_id): Path<u64>,
) -> Result<StatusCode> {
    state
        .friendships
        .accept(friendship_id, member.member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a pending request: decline as receiver, cancel as sender.
async fn delete_request(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Path(friendship_id): Path<u64>,
) -> Result<StatusCode> {
    state
        .friendships
        .delete_request(friendship_id, member.member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the current member's accepted friends.
async fn list_friends(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
) -> Result<Json<Vec<MemberProfile>>> {
    let friends = state.friendships.friends_of(member.member_id).await;
    Ok(Json(friends.iter().map(MemberProfile::from).collect()))
}
