//! Member model: stored record and public API views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time_utils::format_utc_rfc3339;

/// Hiking experience level a member can declare on their profile.
///
/// The set of values is closed; anything else is rejected at the API
/// boundary before a member record is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    /// Allowed values, in the order they are reported to clients.
    pub const ALLOWED: &'static str = "Beginner, Intermediate, Expert";

    /// Parse a client-submitted level string.
    pub fn parse(value: &str) -> Option<Level> {
        match value {
            "Beginner" => Some(Level::Beginner),
            "Intermediate" => Some(Level::Intermediate),
            "Expert" => Some(Level::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Expert => "Expert",
        }
    }
}

/// Role attached to a member account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

/// Member record held by the store.
///
/// This is the internal shape: it carries the password hash and is
/// deliberately not serializable. API responses use [`MemberProfile`].
#[derive(Debug, Clone)]
pub struct Member {
    /// Store-assigned identifier
    pub id: u64,
    /// Email address (unique, immutable after registration)
    pub email: String,
    /// Display name (unique)
    pub username: String,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
    /// Granted roles; `Member` is always implied (see [`Member::role_set`])
    pub roles: Vec<Role>,
    /// Profile picture URL
    pub avatar: Option<String>,
    /// Free-form profile text
    pub bio: Option<String>,
    /// Declared experience level
    pub level: Option<Level>,
    /// Home area shown on the profile
    pub location: Option<String>,
    /// When the member registered
    pub join_date: DateTime<Utc>,
}

impl Member {
    /// Role set with the base `member` role guaranteed present and no
    /// duplicates, regardless of what the stored vector contains.
    pub fn role_set(&self) -> Vec<Role> {
        let mut roles = self.roles.clone();
        roles.push(Role::Member);
        roles.sort();
        roles.dedup();
        roles
    }
}

/// Fields a caller supplies to create a member.
///
/// The store assigns the identifier, join date, and initial role set.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub level: Option<Level>,
}

/// Profile fields that can change after registration.
///
/// `None` means "leave unchanged"; identity fields (email, username,
/// password hash) are not reachable through this type.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub level: Option<Level>,
    pub location: Option<String>,
}

/// Public view of a member, safe to serialize into API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub roles: Vec<Role>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub level: Option<Level>,
    pub location: Option<String>,
    /// Registration timestamp (ISO 8601)
    pub join_date: String,
}

impl From<&Member> for MemberProfile {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            email: member.email.clone(),
            username: member.username.clone(),
            roles: member.role_set(),
            avatar: member.avatar.clone(),
            bio: member.bio.clone(),
            level: member.level,
            location: member.location.clone(),
            join_date: format_utc_rfc3339(member.join_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_member(roles: Vec<Role>) -> Member {
        Member {
            id: 1,
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            roles,
            avatar: None,
            bio: None,
            level: Some(Level::Beginner),
            location: None,
            join_date: Utc::now(),
        }
    }

    #[test]
    fn test_level_parse_accepts_allowed_values() {
        assert_eq!(Level::parse("Beginner"), Some(Level::Beginner));
        assert_eq!(Level::parse("Intermediate"), Some(Level::Intermediate));
        assert_eq!(Level::parse("Expert"), Some(Level::Expert));
    }

    #[test]
    fn test_level_parse_rejects_unknown_and_case_variants() {
        assert_eq!(Level::parse("Extreme"), None);
        assert_eq!(Level::parse("beginner"), None);
        assert_eq!(Level::parse(""), None);
    }

    #[test]
    fn test_role_set_always_contains_member() {
        let member = make_member(vec![]);
        assert_eq!(member.role_set(), vec![Role::Member]);

        let admin = make_member(vec![Role::Admin]);
        assert_eq!(admin.role_set(), vec![Role::Member, Role::Admin]);
    }

    #[test]
    fn test_role_set_deduplicates() {
        let member = make_member(vec![Role::Member, Role::Member, Role::Admin]);
        assert_eq!(member.role_set(), vec![Role::Member, Role::Admin]);
    }

    #[test]
    fn test_profile_hides_password_hash() {
        let member = make_member(vec![]);
        let profile = MemberProfile::from(&member);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["level"], "Beginner");
        assert_eq!(json["roles"], serde_json::json!(["member"]));
    }
}
