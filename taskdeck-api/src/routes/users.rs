/// User endpoints
///
/// # Endpoints
///
/// - `GET /v1/admin/users` - List users with filters and pagination
/// - `GET /v1/user/profile` - The authenticated user's projection
/// - `PUT /v1/user/profile` - Update username / full name
use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde::Deserialize;
use taskdeck_shared::models::user::{UpdateUser, UserPublic};
use taskdeck_shared::query::Filter;
use validator::Validate;

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
    routes::ListResponse,
};

/// Query parameters for the user listing
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub email: Option<String>,
    pub username: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
}

/// Lists users, filterable by email and username
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<ListResponse<UserPublic>>> {
    let mut filters = Vec::new();
    if let Some(email) = query.email {
        filters.push(Filter::new("email", email));
    }
    if let Some(username) = query.username {
        filters.push(Filter::new("username", username));
    }

    let users = state.user_service()?;
    let (data, pagination) = users
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

/// Returns the authenticated user's current projection
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<UserPublic>> {
    let users = state.user_service()?;
    let user = users
        .crud()
        .get_by_id(&current.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user '{}' is not found", current.id)))?;

    Ok(Json(user))
}

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 1, message = "Full name must not be empty"))]
    pub full_name: Option<String>,
}

/// Updates the authenticated user's profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserPublic>> {
    req.validate()?;

    let patch = UpdateUser {
        username: req.username,
        full_name: req.full_name,
    };

    let users = state.user_service()?;
    let user = users
        .crud()
        .update_by_id(&current.id, move |user| user.apply(patch))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user '{}' is not found", current.id)))?;

    Ok(Json(user))
}
