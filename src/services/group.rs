// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hiking group service.
//!
//! Joining and leaving are idempotent: repeating either is a successful
//! no-op, reported through the returned flag rather than an error.

use crate::db::MemberStore;
use crate::error::{AppError, Result};
use crate::models::HikingGroup;

#[derive(Clone)]
pub struct GroupService {
    db: MemberStore,
}

impl GroupService {
    pub fn new(db: MemberStore) -> Self {
        Self { db }
    }

    /// Create a group. The creator becomes its first participant.
    pub async fn create(&self, name: &str, creator_id: u64) -> Result<HikingGroup> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Group name is required".to_string()));
        }
        self.db.create_group(name.to_string(), creator_id).await
    }

    /// All groups.
    pub async fn list(&self) -> Vec<HikingGroup> {
        self.db.list_groups().await
    }

    /// Groups the member participates in.
    pub async fn joined_by(&self, member_id: u64) -> Vec<HikingGroup> {
        self.db.groups_joined_by(member_id).await
    }

    /// A single group by ID.
    pub async fn get(&self, group_id: u64) -> Result<HikingGroup> {
        self.db
            .find_group(group_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))
    }

    /// Add the member to the group. Returns `false` when already joined.
    pub async fn join(&self, group_id: u64, member_id: u64) -> Result<bool> {
        self.db.join_group(group_id, member_id).await
    }

    /// Remove the member from the group. Returns `false` when not joined.
    pub async fn leave(&self, group_id: u64, member_id: u64) -> Result<bool> {
        self.db.leave_group(group_id, member_id).await
    }
}
