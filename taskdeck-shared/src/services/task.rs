/// Task service
use crate::models::task::{Task, TaskView};
use crate::repository::task_repository;
use crate::services::base::CrudService;
use crate::storage::Database;

/// Domain service for tasks
pub struct TaskService {
    crud: CrudService<Task, TaskView>,
}

impl TaskService {
    /// Creates the service over the shared database
    pub fn new(db: &Database) -> Self {
        Self {
            crud: CrudService::new(task_repository(db)),
        }
    }

    /// Generic CRUD operations bound to the task projection
    pub fn crud(&self) -> &CrudService<Task, TaskView> {
        &self.crud
    }
}
