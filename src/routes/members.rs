// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Member profile routes (require authentication).

use axum::{
    extract::State,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthMember;
use crate::models::MemberProfile;
use crate::services::account::UpdateProfileRequest;
use crate::AppState;

/// Profile routes. The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).patch(update_me))
        .route("/api/account", delete(delete_account))
}

// ─── Member Profile ──────────────────────────────────────────

/// Get the current member's profile.
///
/// The token alone is not the profile: the member is looked up fresh, so
/// a deleted account with a still-valid token gets `404` here.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
) -> Result<Json<MemberProfile>> {
    let record = state.accounts.me(member.member_id).await?;
    Ok(Json(MemberProfile::from(&record)))
}

/// Update profile fields on the current member.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<MemberProfile>> {
    let record = state
        .accounts
        .update_profile(member.member_id, request)
        .await?;
    Ok(Json(MemberProfile::from(&record)))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
}

/// Delete the member's account and everything that references it.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(member): Extension<AuthMember>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(member_id = member.member_id, "Member-initiated account deletion");

    state.accounts.delete_account(member.member_id).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        message: "Account deleted. All friendships and group memberships were removed."
            .to_string(),
    }))
}
