// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hiking group routes (require authentication).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthMember;
use crate::models::HikingGroup;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

/// Group routes. The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/groups", post(create_group).get(list_groups))
        .route("/api/groups/joined", get(joined_groups))
        .route("/api/groups/{id}", get(get_group))
        .route("/api/groups/{id}/join", post(join_group))
        .route("/api/groups/{id}/leave", post(leave_group))
}

// ─── Views ───────────────────────────────────────────────────

/// A group as shown to clients.
#[derive(Serialize)]
pub struct GroupView {
    pub id: u64,
    pub name: String,
    /// Participant member IDs, ascending
    pub participants: Vec<u64>,
    pub created_at: String,
}

impl From<&HikingGroup> for GroupView {
    fn from(group: &HikingGroup) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            participants: group.participants.iter().copied().collect(),
            created_at: format_utc_rfc3339(group.created_at),
        }
    }
}

/// Response for a join attempt. `joined` is `false` when the member was
/// already a participant; repeating a join is success either way.
#[derive(Serialize)]
pub struct JoinGroupResponse {
    pub joined: bool,
}

/// Response for a leave attempt. `left` is `false` when the member was
/// not a participant to begin with.
#[derive(Serialize)]
pub struct LeaveGroupResponse {
    pub left: bool,
}

// ─── Handlers ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Create a group; the creator joins automatically.
async fn create_group(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupView>)> {
    let group = state.groups.create(&request.name, member.member_id).await?;
    Ok((StatusCode::CREATED, Json(GroupView::from(&group))))
}

/// List every group.
async fn list_groups(State(state): State<Arc<AppState>>) -> Result<Json<Vec<GroupView>>> {
    let groups = state.groups.list().await;
    Ok(Json(groups.iter().map(GroupView::from).collect()))
}

/// List groups the current member participates in.
async fn joined_groups(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
) -> Result<Json<Vec<GroupView>>> {
    let groups = state.groups.joined_by(member.member_id).await;
    Ok(Json(groups.iter().map(GroupView::from).collect()))
}

/// Get a single group.
async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<u64>,
) -> Result<Json<GroupView>> {
    let group = state.groups.get(group_id).await?;
    Ok(Json(GroupView::from(&group)))
}

/// Join a group (idempotent).
async fn join_group(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Path(group_id): Path<u64>,
) -> Result<Json<JoinGroupResponse>> {
    let joined = state.groups.join(group_id, member.member_id).await?;
    Ok(Json(JoinGroupResponse { joined }))
}

/// Leave a group (idempotent).
async fn leave_group(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Path(group_id): Path<u64>,
) -> Result<Json<LeaveGroupResponse>> {
    let left = state.groups.leave(group_id, member.member_id).await?;
    Ok(Json(LeaveGroupResponse { left }))
}
