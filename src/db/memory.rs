// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store with typed operations.
//!
//! Provides high-level operations for:
//! - Members (account records, unique email/username)
//! - Friendships (directed request records)
//! - Hiking groups (participant sets)
//!
//! Every mutation runs inside a single write-lock section, so checks and
//! the writes they guard commit as one unit: uniqueness at registration,
//! reciprocal-request cleanup at acceptance, and the deletion cascade all
//! observe a consistent snapshot. The store, not its callers, is the
//! authority for these invariants.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{
    Friendship, FriendshipStatus, HikingGroup, Member, NewMember, ProfileChanges, Role,
};

/// Store state guarded by the lock in [`MemberStore`].
#[derive(Default)]
struct StoreInner {
    members: HashMap<u64, Member>,
    friendships: HashMap<u64, Friendship>,
    groups: HashMap<u64, HikingGroup>,
    next_member_id: u64,
    next_friendship_id: u64,
    next_group_id: u64,
}

/// Advance an ID counter. IDs start at 1 and are never reused.
fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// Handle to the shared store. Cheap to clone.
#[derive(Clone, Default)]
pub struct MemberStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemberStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Member Operations ───────────────────────────────────────

    /// Get a member by ID.
    pub async fn find_member(&self, member_id: u64) -> Option<Member> {
        self.inner.read().await.members.get(&member_id).cloned()
    }

    /// Get a member by email (exact match).
    pub async fn find_by_email(&self, email: &str) -> Option<Member> {
        self.inner
            .read()
            .await
            .members
            .values()
            .find(|m| m.email == email)
            .cloned()
    }

    /// Get a member by username (exact match).
    pub async fn find_by_username(&self, username: &str) -> Option<Member> {
        self.inner
            .read()
            .await
            .members
            .values()
            .find(|m| m.username == username)
            .cloned()
    }

    /// Create a member, enforcing email and username uniqueness.
    ///
    /// The check and the insert share one critical section, so two racing
    /// registrations with the same identifier cannot both succeed. The
    /// conflict message never reveals which identifier clashed.
    pub async fn create_member(&self, new_member: NewMember) -> Result<Member, AppError> {
        let mut inner = self.inner.write().await;

        let taken = inner
            .members
            .values()
            .any(|m| m.email == new_member.email || m.username == new_member.username);
        if taken {
            return Err(AppError::Conflict(AppError::DUPLICATE_IDENTITY.to_string()));
        }

        let member = Member {
            id: next_id(&mut inner.next_member_id),
            email: new_member.email,
            username: new_member.username,
            password_hash: new_member.password_hash,
            roles: vec![Role::Member],
            avatar: None,
            bio: None,
            level: new_member.level,
            location: None,
            join_date: Utc::now(),
        };
        inner.members.insert(member.id, member.clone());

        tracing::debug!(member_id = member.id, "Member record created");
        Ok(member)
    }

    /// Apply profile changes to a member. Fields left `None` are untouched.
    pub async fn update_profile(
        &self,
        member_id: u64,
        changes: ProfileChanges,
    ) -> Result<Member, AppError> {
        let mut inner = self.inner.write().await;

        let member = inner
            .members
            .get_mut(&member_id)
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", member_id)))?;

        if let Some(avatar) = changes.avatar {
            member.avatar = Some(avatar);
        }
        if let Some(bio) = changes.bio {
            member.bio = Some(bio);
        }
        if let Some(level) = changes.level {
            member.level = Some(level);
        }
        if let Some(location) = changes.location {
            member.location = Some(location);
        }

        Ok(member.clone())
    }

    /// Delete a member and cascade to everything that references them.
    ///
    /// Removes the account record, every friendship record (either
    /// direction, either status) and every group participation in one
    /// critical section, so no reader ever observes a dangling reference.
    ///
    /// Returns the number of related records removed.
    pub async fn delete_member(&self, member_id: u64) -> Result<usize, AppError> {
        let mut inner = self.inner.write().await;

        if inner.members.remove(&member_id).is_none() {
            return Err(AppError::NotFound(format!("Member {} not found", member_id)));
        }

        // 1. Drop friendship records involving the member
        let before = inner.friendships.len();
        inner.friendships.retain(|_, f| !f.involves(member_id));
        let friendships_removed = before - inner.friendships.len();

        // 2. Drop the member from every group participant set
        let mut memberships_removed = 0;
        for group in inner.groups.values_mut() {
            if group.participants.remove(&member_id) {
                memberships_removed += 1;
            }
        }

        tracing::debug!(
            member_id,
            friendships_removed,
            memberships_removed,
            "Member deleted with cascade"
        );
        Ok(friendships_removed + memberships_removed)
    }

    // ─── Friendship Operations ───────────────────────────────────

    /// Get a friendship record by ID.
    pub async fn find_friendship(&self, friendship_id: u64) -> Option<Friendship> {
        self.inner
            .read()
            .await
            .friendships
            .get(&friendship_id)
            .cloned()
    }

    /// Create a pending friend request from `sender_id` to `receiver_id`.
    ///
    /// Fails with `Conflict` when a record for the same ordered pair
    /// already exists (any status), or when the reverse pair is already
    /// accepted. A reverse request that is merely pending does not
    /// conflict; the pair is resolved at acceptance time instead.
    pub async fn create_friend_request(
        &self,
        sender_id: u64,
        receiver_id: u64,
    ) -> Result<Friendship, AppError> {
        let mut inner = self.inner.write().await;

        for id in [sender_id, receiver_id] {
            if !inner.members.contains_key(&id) {
                return Err(AppError::NotFound(format!("Member {} not found", id)));
            }
        }

        let duplicate = inner.friendships.values().any(|f| {
            (f.sender_id == sender_id && f.receiver_id == receiver_id)
                || (f.sender_id == receiver_id
                    && f.receiver_id == sender_id
                    && f.status == FriendshipStatus::Accepted)
        });
        if duplicate {
            return Err(AppError::Conflict(
                "A friendship or pending request already exists with this member".to_string(),
            ));
        }

        let friendship = Friendship {
            id: next_id(&mut inner.next_friendship_id),
            sender_id,
            receiver_id,
            status: FriendshipStatus::Pending,
            created_at: Utc::now(),
        };
        inner.friendships.insert(friendship.id, friendship.clone());

        tracing::debug!(
            friendship_id = friendship.id,
            sender_id,
            receiver_id,
            "Friend request created"
        );
        Ok(friendship)
    }

    /// Accept a pending friend request.
    ///
    /// The status flip and the cleanup of a reciprocal pending request
    /// (receiver had also asked the sender) commit together, so the pair
    /// ends up with exactly one accepted record and no leftover pendings.
    pub async fn accept_friendship(&self, friendship_id: u64) -> Result<Friendship, AppError> {
        let mut inner = self.inner.write().await;

        let (sender_id, receiver_id) = match inner.friendships.get(&friendship_id) {
            Some(f) if f.status == FriendshipStatus::Pending => (f.sender_id, f.receiver_id),
            _ => {
                return Err(AppError::NotFound(format!(
                    "No pending friend request with id {}",
                    friendship_id
                )))
            }
        };

        let reciprocal: Vec<u64> = inner
            .friendships
            .values()
            .filter(|f| {
                f.id != friendship_id
                    && f.sender_id == receiver_id
                    && f.receiver_id == sender_id
                    && f.status == FriendshipStatus::Pending
            })
            .map(|f| f.id)
            .collect();
        for id in reciprocal {
            inner.friendships.remove(&id);
            tracing::debug!(friendship_id = id, "Reciprocal pending request resolved");
        }

        let friendship = inner
            .friendships
            .get_mut(&friendship_id)
            .ok_or_else(|| AppError::NotFound(format!("Friend request {} not found", friendship_id)))?;
        friendship.status = FriendshipStatus::Accepted;
        let accepted = friendship.clone();

        tracing::debug!(friendship_id, sender_id, receiver_id, "Friend request accepted");
        Ok(accepted)
    }

    /// Delete a pending friend request (decline or cancel).
    ///
    /// Accepted records are out of reach: once accepted there is no
    /// pending request left to delete, and the caller gets `NotFound`.
    pub async fn delete_friendship(&self, friendship_id: u64) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;

        let is_pending = matches!(
            inner.friendships.get(&friendship_id),
            Some(f) if f.status == FriendshipStatus::Pending
        );
        if !is_pending {
            return Err(AppError::NotFound(format!(
                "No pending friend request with id {}",
                friendship_id
            )));
        }

        inner.friendships.remove(&friendship_id);
        tracing::debug!(friendship_id, "Friend request deleted");
        Ok(())
    }

    /// Members with an accepted friendship involving `member_id`, sorted by ID.
    pub async fn friends_of(&self, member_id: u64) -> Vec<Member> {
        let inner = self.inner.read().await;

        let mut friends: Vec<Member> = inner
            .friendships
            .values()
            .filter(|f| f.status == FriendshipStatus::Accepted && f.involves(member_id))
            .filter_map(|f| inner.members.get(&f.counterpart(member_id)).cloned())
            .collect();
        friends.sort_by_key(|m| m.id);
        friends
    }

    /// Pending requests for a member, split into (incoming, outgoing).
    pub async fn pending_requests_for(&self, member_id: u64) -> (Vec<Friendship>, Vec<Friendship>) {
        let inner = self.inner.read().await;

        let mut incoming = Vec::new();
        let mut outgoing = Vec::new();
        for f in inner.friendships.values() {
            if f.status != FriendshipStatus::Pending {
                continue;
            }
            if f.receiver_id == member_id {
                incoming.push(f.clone());
            } else if f.sender_id == member_id {
                outgoing.push(f.clone());
            }
        }
        incoming.sort_by_key(|f| f.id);
        outgoing.sort_by_key(|f| f.id);
        (incoming, outgoing)
    }

    // ─── Group Operations ────────────────────────────────────────

    /// Get a group by ID.
    pub async fn find_group(&self, group_id: u64) -> Option<HikingGroup> {
        self.inner.read().await.groups.get(&group_id).cloned()
    }

    /// All groups, sorted by ID.
    pub async fn list_groups(&self) -> Vec<HikingGroup> {
        let inner = self.inner.read().await;
        let mut groups: Vec<HikingGroup> = inner.groups.values().cloned().collect();
        groups.sort_by_key(|g| g.id);
        groups
    }

    /// Groups whose participant set contains `member_id`, sorted by ID.
    pub async fn groups_joined_by(&self, member_id: u64) -> Vec<HikingGroup> {
        let inner = self.inner.read().await;
        let mut groups: Vec<HikingGroup> = inner
            .groups
            .values()
            .filter(|g| g.has_participant(member_id))
            .cloned()
            .collect();
        groups.sort_by_key(|g| g.id);
        groups
    }

    /// Create a group with the creator as its first participant.
    pub async fn create_group(
        &self,
        name: String,
        creator_id: u64,
    ) -> Result<HikingGroup, AppError> {
        let mut inner = self.inner.write().await;

        if !inner.members.contains_key(&creator_id) {
            return Err(AppError::NotFound(format!("Member {} not found", creator_id)));
        }

        let group = HikingGroup {
            id: next_id(&mut inner.next_group_id),
            name,
            participants: BTreeSet::from([creator_id]),
            created_at: Utc::now(),
        };
        inner.groups.insert(group.id, group.clone());

        tracing::debug!(group_id = group.id, creator_id, "Group created");
        Ok(group)
    }

    /// Add a member to a group's participant set.
    ///
    /// Returns `true` if the member was added, `false` if they were
    /// already a participant. Joining twice is a no-op, never an error.
    pub async fn join_group(&self, group_id: u64, member_id: u64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;

        if !inner.members.contains_key(&member_id) {
            return Err(AppError::NotFound(format!("Member {} not found", member_id)));
        }

        let group = inner
            .groups
            .get_mut(&group_id)
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))?;

        let joined = group.participants.insert(member_id);
        if joined {
            tracing::debug!(group_id, member_id, "Member joined group");
        }
        Ok(joined)
    }

    /// Remove a member from a group's participant set.
    ///
    /// Returns `true` if the member was removed, `false` if they were not
    /// a participant. The group itself stays, even when emptied.
    pub async fn leave_group(&self, group_id: u64, member_id: u64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;

        let group = inner
            .groups
            .get_mut(&group_id)
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))?;

        let left = group.participants.remove(&member_id);
        if left {
            tracing::debug!(group_id, member_id, "Member left group");
        }
        Ok(left)
    }
}
