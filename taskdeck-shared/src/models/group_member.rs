/// Group membership model
///
/// A membership is identified by its (group, user) pair — there is no
/// surrogate key, so the storage engine's primary-key uniqueness is what
/// guarantees at most one membership record per pair.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Record;

/// Role a user holds within a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    /// Can manage the group and its members
    Admin,

    /// Regular participant
    #[default]
    Member,
}

impl GroupRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Admin => "admin",
            GroupRole::Member => "member",
        }
    }
}

/// Composite primary key of a membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMemberKey {
    pub group_id: Uuid,
    pub user_id: Uuid,
}

impl fmt::Display for GroupMemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.user_id)
    }
}

/// Membership record linking a user to a group with a role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: GroupRole,
    pub joined_at: DateTime<Utc>,
}

/// Input for creating a membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupMember {
    pub group_id: Uuid,
    pub user_id: Uuid,

    /// Role to assign (defaults to member)
    #[serde(default)]
    pub role: GroupRole,
}

impl GroupMember {
    /// Materializes a new membership with a join timestamp
    pub fn new(data: CreateGroupMember) -> Self {
        Self {
            group_id: data.group_id,
            user_id: data.user_id,
            role: data.role,
            joined_at: Utc::now(),
        }
    }
}

impl Record for GroupMember {
    type Key = GroupMemberKey;

    const TABLE: &'static str = "group_members";

    fn key(&self) -> GroupMemberKey {
        GroupMemberKey {
            group_id: self.group_id,
            user_id: self.user_id,
        }
    }
}

/// Membership projection returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMemberView {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: GroupRole,
    pub joined_at: DateTime<Utc>,
}

impl From<GroupMember> for GroupMemberView {
    fn from(member: GroupMember) -> Self {
        Self {
            group_id: member.group_id,
            user_id: member.user_id,
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(GroupRole::Admin).unwrap(),
            serde_json::json!("admin")
        );
        assert_eq!(GroupRole::default(), GroupRole::Member);
    }

    #[test]
    fn test_key_display() {
        let key = GroupMemberKey {
            group_id: Uuid::nil(),
            user_id: Uuid::nil(),
        };
        assert_eq!(
            key.to_string(),
            "00000000-0000-0000-0000-000000000000:00000000-0000-0000-0000-000000000000"
        );
    }
}
