// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friendship service: request lifecycle and permission checks.
//!
//! The store owns the state machine (pending -> accepted, or deleted);
//! this layer decides who may drive which transition. Acceptance is the
//! receiver's alone; deleting a pending request (decline or cancel) is
//! open to either party and nobody else.

use crate::db::MemberStore;
use crate::error::{AppError, Result};
use crate::models::{Friendship, FriendshipStatus, Member};

#[derive(Clone)]
pub struct FriendshipService {
    db: MemberStore,
}

impl FriendshipService {
    pub fn new(db: MemberStore) -> Self {
        Self { db }
    }

    /// Send a friend request to another member.
    pub async fn send_request(&self, sender_id: u64, receiver_id: u64) -> Result<Friendship> {
        if sender_id == receiver_id {
            return Err(AppError::Validation(
                "Cannot send a friend request to yourself".to_string(),
            ));
        }
        self.db.create_friend_request(sender_id, receiver_id).await
    }

    /// Accept a pending request addressed to `acting_member`.
    pub async fn accept(&self, friendship_id: u64, acting_member: u64) -> Result<Friendship> {
        let request = self.require_request(friendship_id).await?;
        if request.receiver_id != acting_member {
            return Err(AppError::Forbidden(
                "Only the receiver can accept a friend request".to_string(),
            ));
        }
        if request.status != FriendshipStatus::Pending {
            return Err(AppError::NotFound(format!(
                "No pending friend request with id {}",
                friendship_id
            )));
        }
        self.db.accept_friendship(friendship_id).await
    }

    /// Delete a pending request: decline as receiver, cancel as sender.
    pub async fn delete_request(&self, friendship_id: u64, acting_member: u64) -> Result<()> {
        let request = self.require_request(friendship_id).await?;
        if !request.involves(acting_member) {
            return Err(AppError::Forbidden(
                "Only the sender or receiver can delete a friend request".to_string(),
            ));
        }
        self.db.delete_friendship(friendship_id).await
    }

    /// Accepted friends of a member.
    pub async fn friends_of(&self, member_id: u64) -> Vec<Member> {
        self.db.friends_of(member_id).await
    }

    /// Pending requests involving a member, as (incoming, outgoing).
    pub async fn pending_for(&self, member_id: u64) -> (Vec<Friendship>, Vec<Friendship>) {
        self.db.pending_requests_for(member_id).await
    }

    async fn require_request(&self, friendship_id: u64) -> Result<Friendship> {
        self.db
            .find_friendship(friendship_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Friend request {} not found", friendship_id)))
    }
}
