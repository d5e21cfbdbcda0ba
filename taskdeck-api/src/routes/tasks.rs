/// Task endpoints
///
/// # Endpoints
///
/// - `GET    /v1/user/tasks` - List tasks with filters and pagination
/// - `POST   /v1/user/tasks`
/// - `GET    /v1/user/tasks/:id`
/// - `PUT    /v1/user/tasks/:id`
/// - `DELETE /v1/user/tasks/:id` (`?hard=true` for physical removal)
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskdeck_shared::models::task::{CreateTask, Task, TaskStatus, TaskView, UpdateTask};
use taskdeck_shared::query::Filter;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{DeleteQuery, DeleteResponse, ListResponse},
};

/// Query parameters for the task listing
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub title: Option<String>,
    pub status: Option<String>,
    pub group_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
}

/// Lists tasks, filterable by title, status, group, and assignee
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<ListResponse<TaskView>>> {
    let mut filters = Vec::new();
    if let Some(title) = query.title {
        filters.push(Filter::new("title", title));
    }
    if let Some(status) = query.status {
        filters.push(Filter::new("status", status));
    }
    if let Some(group_id) = query.group_id {
        filters.push(Filter::new("group_id", group_id.to_string()));
    }
    if let Some(assigned_to) = query.assigned_to {
        filters.push(Filter::new("assigned_to", assigned_to.to_string()));
    }

    let tasks = state.task_service()?;
    let (data, pagination) = tasks
        .crud()
        .list_with_pagination(
            &filters,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(100),
            query.order_by.as_deref(),
        )
        .await;

    Ok(Json(ListResponse { data, pagination }))
}

/// Task creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub group_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
}

/// Creates a task in the `todo` state
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<TaskView>> {
    req.validate()?;

    let tasks = state.task_service()?;
    let task = tasks
        .crud()
        .create(Task::new(CreateTask {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            group_id: req.group_id,
            assigned_to: req.assigned_to,
        }))
        .await?;

    Ok(Json(task))
}

/// Returns a task by id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskView>> {
    let tasks = state.task_service()?;
    let task = tasks
        .crud()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task '{}' is not found", id)))?;

    Ok(Json(task))
}

/// Task update request; absent fields keep their value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<Uuid>,
    pub attachment: Option<Vec<String>>,
}

/// Patches a task in place
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskView>> {
    req.validate()?;

    let patch = UpdateTask {
        title: req.title,
        description: req.description,
        due_date: req.due_date,
        status: req.status,
        assigned_to: req.assigned_to,
        attachment: req.attachment,
    };

    let tasks = state.task_service()?;
    let task = tasks
        .crud()
        .update_by_id(&id, move |task| task.apply(patch))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task '{}' is not found", id)))?;

    Ok(Json(task))
}

/// Deletes a task (soft by default)
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<Json<DeleteResponse>> {
    let tasks = state.task_service()?;
    tasks.crud().delete_by_id(&id, !query.hard).await?;

    Ok(Json(DeleteResponse { deleted: true }))
}
