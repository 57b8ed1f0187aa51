// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account service: registration, login, profile, deletion.
//!
//! Registration order is fixed: presence checks, then the combined
//! duplicate check, then level validation, and only then hashing and
//! persistence. A request with several problems always reports the
//! earliest one in that order.

use serde::Deserialize;
use validator::Validate;

use crate::db::MemberStore;
use crate::error::{AppError, Result};
use crate::models::{Level, Member, NewMember, ProfileChanges};
use crate::services::password;
use crate::services::token::TokenService;

/// Registration payload.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub email: String,
    #[validate(length(max = 50, message = "Username must be at most 50 characters"))]
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub level: Option<String>,
}

/// Login payload. `login` holds either an email or a username.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Profile update payload. Absent fields are left unchanged; email,
/// username, and password are not editable here.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub level: Option<String>,
    pub location: Option<String>,
}

/// Account management backed by the store and the token issuer.
#[derive(Clone)]
pub struct AccountService {
    db: MemberStore,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(db: MemberStore, tokens: TokenService) -> Self {
        Self { db, tokens }
    }

    /// Register a new member and issue their first session token.
    pub async fn register(&self, request: RegisterRequest) -> Result<(String, Member)> {
        if request.email.is_empty() || request.username.is_empty() || request.password.is_empty() {
            return Err(AppError::Validation(
                "Email, username and password are required".to_string(),
            ));
        }
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // One combined check with one combined message: the caller never
        // learns which identifier collided.
        let email_taken = self.db.find_by_email(&request.email).await.is_some();
        let username_taken = self.db.find_by_username(&request.username).await.is_some();
        if email_taken || username_taken {
            return Err(AppError::Conflict(AppError::DUPLICATE_IDENTITY.to_string()));
        }

        let level = parse_level(request.level.as_deref())?;
        let password_hash = password::hash(&request.password)?;

        let member = self
            .db
            .create_member(NewMember {
                email: request.email,
                username: request.username,
                password_hash,
                level,
            })
            .await?;
        let token = self.tokens.issue(&member)?;

        tracing::info!(member_id = member.id, "Member registered");
        Ok((token, member))
    }

    /// Authenticate a member and issue a session token.
    pub async fn login(&self, request: LoginRequest) -> Result<String> {
        if request.login.is_empty() || request.password.is_empty() {
            return Err(AppError::Validation(
                "Login and password are required".to_string(),
            ));
        }

        // Email lookup wins when the identifier matches one member's email
        // and another member's username.
        let member = match self.db.find_by_email(&request.login).await {
            Some(member) => Some(member),
            None => self.db.find_by_username(&request.login).await,
        };

        // Unknown identifier and wrong password fail identically.
        let member = member.ok_or(AppError::AuthenticationFailed)?;
        if !password::verify(&request.password, &member.password_hash) {
            return Err(AppError::AuthenticationFailed);
        }

        let token = self.tokens.issue(&member)?;
        tracing::info!(member_id = member.id, "Member logged in");
        Ok(token)
    }

    /// Look up the member behind an authenticated session.
    pub async fn me(&self, member_id: u64) -> Result<Member> {
        self.db
            .find_member(member_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", member_id)))
    }

    /// Apply profile changes and return the updated member.
    pub async fn update_profile(
        &self,
        member_id: u64,
        request: UpdateProfileRequest,
    ) -> Result<Member> {
        let changes = ProfileChanges {
            avatar: request.avatar,
            bio: request.bio,
            level: parse_level(request.level.as_deref())?,
            location: request.location,
        };
        self.db.update_profile(member_id, changes).await
    }

    /// Delete the member's account with its full cascade.
    ///
    /// Returns the number of related records that were removed.
    pub async fn delete_account(&self, member_id: u64) -> Result<usize> {
        let removed = self.db.delete_member(member_id).await?;
        tracing::info!(member_id, removed, "Member account deleted");
        Ok(removed)
    }
}

/// Parse an optional client-submitted level string.
fn parse_level(value: Option<&str>) -> Result<Option<Level>> {
    match value {
        None => Ok(None),
        Some(raw) => Level::parse(raw).map(Some).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid level provided. Allowed values: {}.",
                Level::ALLOWED
            ))
        }),
    }
}
