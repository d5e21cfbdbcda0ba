/// Group-member repository: filterable by role and by either side of the
/// composite key
use crate::models::group_member::GroupMember;
use crate::query::{FilterMap, SortKey};
use crate::repository::Repository;
use crate::storage::Database;

/// Builds the group-member repository with its filter/sort composition
/// table
pub fn group_member_repository(db: &Database) -> Repository<GroupMember> {
    let filters = FilterMap::base()
        .filter("role", |member: &GroupMember, value| {
            value
                .as_str()
                .map_or(false, |role| member.role.as_str().eq_ignore_ascii_case(role))
        })
        .filter("group_id", |member: &GroupMember, value| {
            value
                .as_str()
                .map_or(false, |id| member.group_id.to_string() == id)
        })
        .filter("user_id", |member: &GroupMember, value| {
            value
                .as_str()
                .map_or(false, |id| member.user_id.to_string() == id)
        })
        .order("joined_at", |member: &GroupMember| {
            SortKey::Instant(member.joined_at)
        });

    Repository::new(db.group_members.clone(), filters)
}
