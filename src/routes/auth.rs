// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login routes (public).

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::MemberProfile;
use crate::services::account::{LoginRequest, RegisterRequest};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
}

/// Response for a successful registration.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub message: String,
    pub member: MemberProfile,
}

/// Response for a successful login.
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Create an account and return the first session token.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let (token, member) = state.accounts.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            token,
            message: "User created successfully".to_string(),
            member: MemberProfile::from(&member),
        }),
    ))
}

/// Exchange credentials for a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let token = state.accounts.login(request).await?;
    Ok(Json(LoginResponse { token }))
}
