/// Application database: one shared table per entity
///
/// Constructed once at startup and handed around by `Arc`; repositories
/// clone the table handles they need. This is the explicit-state
/// replacement for a module-level database singleton.
use std::sync::Arc;

use super::Table;
use crate::models::group::Group;
use crate::models::group_member::GroupMember;
use crate::models::task::Task;
use crate::models::user::User;

/// Owns the storage tables for every domain entity
pub struct Database {
    pub users: Arc<Table<User>>,
    pub groups: Arc<Table<Group>>,
    pub group_members: Arc<Table<GroupMember>>,
    pub tasks: Arc<Table<Task>>,
}

impl Database {
    /// Creates an empty database
    pub fn new() -> Self {
        Self {
            users: Arc::new(Table::new()),
            groups: Arc::new(Table::new()),
            group_members: Arc::new(Table::new()),
            tasks: Arc::new(Table::new()),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
