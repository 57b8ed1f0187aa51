//! Friendship request model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a friendship record.
///
/// There is no rejected state: declining or cancelling a pending request
/// deletes the record, so the pair can start over later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
}

/// Directed friendship record between two members.
///
/// Direction is preserved after acceptance (who asked whom), but an
/// accepted record counts as friendship for both parties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    /// Store-assigned identifier
    pub id: u64,
    /// Member who sent the request
    pub sender_id: u64,
    /// Member the request was addressed to
    pub receiver_id: u64,
    pub status: FriendshipStatus,
    /// When the request was sent
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    /// Whether `member_id` is one of the two parties.
    pub fn involves(&self, member_id: u64) -> bool {
        self.sender_id == member_id || self.receiver_id == member_id
    }

    /// The other party relative to `member_id`.
    ///
    /// Only meaningful when [`Friendship::involves`] holds for `member_id`.
    pub fn counterpart(&self, member_id: u64) -> u64 {
        if self.sender_id == member_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}
