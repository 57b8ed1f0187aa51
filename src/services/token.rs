// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token issue and verify (JWT, HS256).
//!
//! Tokens are stateless bearer credentials: validity is a function of the
//! signature and the expiry claim only, never of store state. Claims are a
//! snapshot of the member at issuance and are not refreshed if the member
//! record changes afterwards.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Member, Role};

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (member ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Email at issuance
    pub email: String,
    /// Role set at issuance
    pub roles: Vec<Role>,
}

impl Claims {
    /// Member ID carried in `sub`.
    pub fn member_id(&self) -> Result<u64, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }
}

/// Issues and verifies session tokens with a process-wide signing key.
#[derive(Clone)]
pub struct TokenService {
    signing_key: Vec<u8>,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(signing_key: Vec<u8>, ttl_secs: u64) -> Self {
        Self {
            signing_key,
            ttl_secs,
        }
    }

    /// Create a token for a member session, expiring after the configured TTL.
    pub fn issue(&self, member: &Member) -> Result<String, AppError> {
        self.issue_at(member, Utc::now())
    }

    /// Create a token with an explicit issuance instant.
    ///
    /// Used by tests to mint tokens near or past the expiry boundary.
    pub fn issue_at(&self, member: &Member, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let iat = issued_at.timestamp() as usize;

        let claims = Claims {
            sub: member.id.to_string(),
            iat,
            exp: iat + self.ttl_secs as usize,
            email: member.email.clone(),
            roles: member.role_set(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token creation failed: {}", e)))
    }

    /// Decode a token and return its claims.
    ///
    /// Fails with `InvalidToken` on a bad signature, malformed structure,
    /// or an expired `exp` claim. Expiry is enforced exactly, with no
    /// leeway window. The store is never consulted.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let key = DecodingKey::from_secret(&self.signing_key);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}
