/// Task repository: base fields plus title, status, and the weak
/// references
use crate::models::task::Task;
use crate::query::{FilterMap, SortKey};
use crate::repository::Repository;
use crate::storage::Database;

/// Builds the task repository with its filter/sort composition table
pub fn task_repository(db: &Database) -> Repository<Task> {
    let filters = FilterMap::base()
        .filter("title", |task: &Task, value| {
            value
                .as_str()
                .map_or(false, |title| task.title.eq_ignore_ascii_case(title))
        })
        .filter("status", |task: &Task, value| {
            value
                .as_str()
                .map_or(false, |status| task.status.as_str() == status)
        })
        .filter("group_id", |task: &Task, value| {
            value.as_str().map_or(false, |id| {
                task.group_id.map_or(false, |group_id| group_id.to_string() == id)
            })
        })
        .filter("assigned_to", |task: &Task, value| {
            value.as_str().map_or(false, |id| {
                task.assigned_to.map_or(false, |user_id| user_id.to_string() == id)
            })
        })
        .order("title", |task: &Task| SortKey::Text(task.title.clone()))
        .order("due_date", |task: &Task| {
            task.due_date.map_or(SortKey::Missing, SortKey::Instant)
        })
        .order("created_at", |task: &Task| SortKey::Instant(task.created_at));

    Repository::new(db.tasks.clone(), filters)
}
