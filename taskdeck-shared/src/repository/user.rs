/// User repository: filterable by email and username
use crate::models::user::User;
use crate::query::{FilterMap, SortKey};
use crate::repository::Repository;
use crate::storage::Database;

/// Builds the user repository with its filter/sort composition table
pub fn user_repository(db: &Database) -> Repository<User> {
    let filters = FilterMap::base()
        .filter("email", |user: &User, value| {
            value
                .as_str()
                .map_or(false, |email| user.email.eq_ignore_ascii_case(email))
        })
        .filter("username", |user: &User, value| {
            value
                .as_str()
                .map_or(false, |username| user.username.as_deref() == Some(username))
        })
        .order("email", |user: &User| SortKey::Text(user.email.clone()))
        .order("full_name", |user: &User| SortKey::Text(user.full_name.clone()))
        .order("created_at", |user: &User| SortKey::Instant(user.created_at));

    Repository::new(db.users.clone(), filters)
}
