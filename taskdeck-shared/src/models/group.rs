/// Group model
///
/// Groups own their memberships and tasks by reference only; deleting a
/// group does not cascade.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Record;

/// Group record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    pub name: String,
}

/// Input for renaming a group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroup {
    pub name: Option<String>,
}

impl Group {
    /// Materializes a new group with a generated id and timestamp
    pub fn new(data: CreateGroup) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            created_at: Utc::now(),
        }
    }

    /// Applies a patch in place
    pub fn apply(&mut self, patch: UpdateGroup) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

impl Record for Group {
    type Key = Uuid;

    const TABLE: &'static str = "groups";

    fn key(&self) -> Uuid {
        self.id
    }
}

/// Group projection returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Group> for GroupView {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            created_at: group.created_at,
        }
    }
}
