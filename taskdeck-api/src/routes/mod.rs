/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login)
/// - `users`: Admin user listing and the profile endpoints
/// - `groups`: Group CRUD
/// - `tasks`: Task CRUD
use serde::{Deserialize, Serialize};
use taskdeck_shared::query::Pagination;

pub mod auth;
pub mod groups;
pub mod health;
pub mod tasks;
pub mod users;

/// List response body: a page of items plus pagination counters
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Delete response body
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Delete selector: `?hard=true` removes the row physically
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub hard: bool,
}
