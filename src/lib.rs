// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trailmates: accounts and trail companions for group hikes
//!
//! This crate provides the backend API for member accounts, friendships,
//! and hiking-group membership.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemberStore;
use services::{AccountService, FriendshipService, GroupService, TokenService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemberStore,
    pub tokens: TokenService,
    pub accounts: AccountService,
    pub friendships: FriendshipService,
    pub groups: GroupService,
}
