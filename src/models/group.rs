//! Hiking group model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hiking group with its participant set.
///
/// The participant set is the single representation of the member/group
/// relation; a member's joined groups are derived by scanning it, never
/// stored a second time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HikingGroup {
    /// Store-assigned identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Member IDs currently in the group (ordered for stable output)
    pub participants: BTreeSet<u64>,
    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl HikingGroup {
    pub fn has_participant(&self, member_id: u64) -> bool {
        self.participants.contains(&member_id)
    }
}
