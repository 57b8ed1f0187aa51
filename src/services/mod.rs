// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod friendship;
pub mod group;
pub mod password;
pub mod token;

pub use account::AccountService;
pub use friendship::FriendshipService;
pub use group::GroupService;
pub use token::{Claims, TokenService};
