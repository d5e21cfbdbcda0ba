/// User model and projections
///
/// Users authenticate with an email or username plus a password that is
/// only ever stored as an Argon2id hash. Accounts are soft-deleted: the
/// tombstone flag hides them from default reads without destroying the
/// row.
///
/// # Example
///
/// ```
/// use taskdeck_shared::models::user::{CreateUser, User, UserPublic};
///
/// let user = User::new(CreateUser {
///     email: "user@example.com".to_string(),
///     username: Some("jdoe".to_string()),
///     password_hash: "$argon2id$...".to_string(),
///     full_name: "Jane Doe".to_string(),
/// });
///
/// // The public projection never carries the password hash.
/// let public = UserPublic::from(user);
/// assert_eq!(public.email, "user@example.com");
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Record;

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Optional unique handle
    pub username: Option<String>,

    /// Argon2id password hash, never a plaintext password
    pub password_hash: String,

    /// Display name
    pub full_name: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Soft-delete tombstone; default reads exclude flagged rows
    pub is_deleted: bool,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub username: Option<String>,

    /// Argon2id password hash (NOT a plaintext password)
    pub password_hash: String,
    pub full_name: String,
}

/// Input for updating an existing user
///
/// Only non-None fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub full_name: Option<String>,
}

impl User {
    /// Materializes a new user record with a generated id and timestamps
    pub fn new(data: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: data.email,
            username: data.username,
            password_hash: data.password_hash,
            full_name: data.full_name,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }

    /// Applies a patch in place and bumps `updated_at`
    pub fn apply(&mut self, patch: UpdateUser) {
        if let Some(username) = patch.username {
            self.username = Some(username);
        }
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        self.updated_at = Utc::now();
    }
}

impl Record for User {
    type Key = Uuid;

    const TABLE: &'static str = "users";
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

/// Public user projection
///
/// The shape embedded in tokens and returned by every user-facing
/// endpoint. The password hash is deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
