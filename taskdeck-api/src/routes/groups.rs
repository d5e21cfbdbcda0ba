/// Group endpoints
///
/// # Endpoints
///
/// - `GET    /v1/user/groups` - List groups with filters and pagination
/// - `POST   /v1/user/groups` - Create a group (caller becomes admin)
/// - `GET    /v1/user/groups/:id`
/// - `PUT    /v1/user/groups/:id`
/// - `DELETE /v1/user/groups/:id` (`?hard=true` for physical removal)
/// - `GET    /v1/user/groups/:id/members` - The group's membership rows
use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use taskdeck_shared::models::group::{CreateGroup, GroupView, UpdateGroup};
use taskdeck_shared::models::group_member::GroupMemberView;
use taskdeck_shared::query::Filter;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
    routes::{DeleteQuery, DeleteResponse, ListResponse},
};

/// Query parameters for the group listing
#[derive(Debug, Deserialize)]
pub struct ListGroupsQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
}

/// Lists groups, filterable by name
pub async fn list_groups(
    State(state): State<AppState>,
    Query(query): Query<ListGroupsQuery>,
) -> ApiResult<Json<ListResponse<GroupView>>> {
    let mut filters = Vec::new();
    if let Some(name) = query.name {
        filters.push(Filter::new("name", name));
    }

    let groups = state.group_service()?;
    let (data, pagination) = groups
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

/// Group creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, message = "Group name must not be empty"))]
    pub name: String,
}

/// Creates a group; the authenticated caller becomes its admin member
pub async fn create_group(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateGroupRequest>,
) -> ApiResult<Json<GroupView>> {
    req.validate()?;

    let groups = state.group_service()?;
    let group = groups
        .create_group(CreateGroup { name: req.name }, current.id)
        .await?;

    Ok(Json(group))
}

/// Returns a group by id
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<GroupView>> {
    let groups = state.group_service()?;
    let group = groups
        .crud()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("group '{}' is not found", id)))?;

    Ok(Json(group))
}

/// Group rename request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, message = "Group name must not be empty"))]
    pub name: Option<String>,
}

/// Renames a group
pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateGroupRequest>,
) -> ApiResult<Json<GroupView>> {
    req.validate()?;

    let patch = UpdateGroup { name: req.name };

    let groups = state.group_service()?;
    let group = groups
        .crud()
        .update_by_id(&id, move |group| group.apply(patch))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("group '{}' is not found", id)))?;

    Ok(Json(group))
}

/// Query parameters for the member listing
#[derive(Debug, Deserialize)]
pub struct ListMembersQuery {
    pub role: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
}

/// Lists a group's membership rows, filterable by role
pub async fn list_group_members(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListMembersQuery>,
) -> ApiResult<Json<ListResponse<GroupMemberView>>> {
    // 404 for unknown groups rather than an empty page.
    let groups = state.group_service()?;
    groups
        .crud()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("group '{}' is not found", id)))?;

    let mut filters = vec![Filter::new("group_id", id.to_string())];
    if let Some(role) = query.role {
        filters.push(Filter::new("role", role));
    }

    let members = state.group_member_service()?;
    let (data, pagination) = members
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

/// Deletes a group
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<Json<DeleteResponse>> {
    let groups = state.group_service()?;
    groups.crud().delete_by_id(&id, !query.hard).await?;

    Ok(Json(DeleteResponse { deleted: true }))
}
