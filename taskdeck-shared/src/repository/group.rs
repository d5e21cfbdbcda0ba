/// Group repository: filterable by name (case-insensitive)
use crate::models::group::Group;
use crate::query::{FilterMap, SortKey};
use crate::repository::Repository;
use crate::storage::Database;

/// Builds the group repository with its filter/sort composition table
pub fn group_repository(db: &Database) -> Repository<Group> {
    let filters = FilterMap::base()
        .filter("name", |group: &Group, value| {
            value
                .as_str()
                .map_or(false, |name| group.name.eq_ignore_ascii_case(name))
        })
        .order("name", |group: &Group| SortKey::Text(group.name.clone()))
        .order("created_at", |group: &Group| SortKey::Instant(group.created_at));

    Repository::new(db.groups.clone(), filters)
}
