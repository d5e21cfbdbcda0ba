/// Task model
///
/// Tasks optionally reference an assignee and a group by id (weak
/// references, no cascading behavior) and carry an ordered list of opaque
/// attachment references. Tasks are soft-deleted by default.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Record;

/// Task lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    pub title: String,
    pub description: String,

    /// Optional deadline
    pub due_date: Option<DateTime<Utc>>,

    pub status: TaskStatus,

    /// Ordered list of opaque attachment references
    pub attachment: Vec<String>,

    /// Weak reference to the assigned user
    pub assigned_to: Option<Uuid>,

    /// Weak reference to the owning group
    pub group_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Soft-delete tombstone; default reads exclude flagged rows
    pub is_deleted: bool,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub group_id: Option<Uuid>,

    #[serde(default)]
    pub assigned_to: Option<Uuid>,
}

/// Input for updating a task
///
/// Only non-None fields are applied; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<Uuid>,
    pub attachment: Option<Vec<String>>,
}

impl Task {
    /// Materializes a new task with a generated id, timestamps, and the
    /// `todo` starting state
    pub fn new(data: CreateTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description.unwrap_or_default(),
            due_date: data.due_date,
            status: TaskStatus::default(),
            attachment: Vec::new(),
            assigned_to: data.assigned_to,
            group_id: data.group_id,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }

    /// Applies a patch in place and bumps `updated_at`
    pub fn apply(&mut self, patch: UpdateTask) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = Some(assigned_to);
        }
        if let Some(attachment) = patch.attachment {
            self.attachment = attachment;
        }
        self.updated_at = Utc::now();
    }
}

impl Record for Task {
    type Key = Uuid;

    const TABLE: &'static str = "tasks";
    const SOFT_DELETE: bool = true;

    fn key(&self) -> Uuid {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.is_deleted = deleted;
        self.updated_at = Utc::now();
    }
}

/// Task projection returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub attachment: Vec<String>,
    pub assigned_to: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            due_date: task.due_date,
            attachment: task.attachment,
            assigned_to: task.assigned_to,
            group_id: task.group_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
