// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod friendship;
pub mod group;
pub mod member;

pub use friendship::{Friendship, FriendshipStatus};
pub use group::HikingGroup;
pub use member::{Level, Member, MemberProfile, NewMember, ProfileChanges, Role};
