/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register a new account
/// - `POST /v1/auth/login` - Login with an email or username
use axum::{extract::State, Json};
use serde::Deserialize;
use taskdeck_shared::models::user::UserPublic;
use taskdeck_shared::services::user::{LoginSession, LoginUser, RegisterUser};
use validator::Validate;

use crate::{app::AppState, error::ApiResult};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Password repeated, must match
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,

    /// Optional handle
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: Option<String>,

    /// Display name
    #[validate(length(min = 1, message = "Full name must not be empty"))]
    pub full_name: String,
}

/// Login request; `identity` is an email or a username
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, message = "Identity must be at least 3 characters"))]
    pub identity: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Register a new account
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `409 Conflict`: Email or username already taken
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<UserPublic>> {
    req.validate()?;

    let users = state.user_service()?;
    let user = users
        .auth_register(RegisterUser {
            email: req.email,
            password: req.password,
            username: req.username,
            full_name: req.full_name,
        })
        .await?;

    Ok(Json(user))
}

/// Login and receive a signed token
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `401 Unauthorized`: Unknown identity or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginSession>> {
    req.validate()?;

    let users = state.user_service()?;
    let session = users
        .auth_login(LoginUser {
            identity: req.identity,
            password: req.password,
        })
        .await?;

    Ok(Json(session))
}
