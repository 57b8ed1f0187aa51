// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token authentication middleware.

use crate::error::AppError;
use crate::models::Role;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie the frontend stores the session token in.
pub const SESSION_COOKIE: &str = "trailmates_token";

/// Authenticated member extracted from a verified token.
///
/// Fields mirror the claims at issuance; a profile or role change after
/// issuance is not reflected until a new token is minted.
#[derive(Debug, Clone)]
pub struct AuthMember {
    pub member_id: u64,
    pub email: String,
    pub roles: Vec<Role>,
}

/// Middleware that requires a valid session token.
///
/// A missing, malformed, expired, or tampered token all fail the same
/// way; the store is not consulted here.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return Err(AppError::InvalidToken),
        }
    };

    let claims = state.tokens.verify(&token)?;
    let auth_member = AuthMember {
        member_id: claims.member_id()?,
        email: claims.email,
        roles: claims.roles,
    };
    request.extensions_mut().insert(auth_member);

    Ok(next.run(request).await)
}
