/// Common error taxonomy for the TaskDeck core
///
/// Domain-level errors (not-found, conflict, unauthorized) are raised from
/// the service layer only; the repository stays domain-error-free and
/// surfaces nothing beyond [`StorageError`]. The HTTP layer maps each kind
/// to a status code.
///
/// # Example
///
/// ```
/// use taskdeck_shared::error::CoreError;
///
/// let err = CoreError::not_found("user", "42");
/// assert_eq!(err.to_string(), "user '42' is not found");
/// ```
use crate::auth::jwt::TokenError;
use crate::auth::password::PasswordError;
use crate::storage::StorageError;

/// Core result type alias
pub type CoreResult<T> = Result<T, CoreError>;

/// Unified core error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Entity absent by id or filter
    #[error("{entity} '{id}' is not found")]
    NotFound { entity: String, id: String },

    /// Uniqueness violation, e.g. duplicate email
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or missing token
    #[error("{0}")]
    Unauthorized(String),

    /// Malformed input payload
    #[error("{0}")]
    Validation(String),

    /// Container misuse (accessed before boot, unknown key, bad wiring)
    #[error("service container: {0}")]
    Configuration(String),

    /// Unexpected storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Password hashing collaborator failure
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token issuance collaborator failure
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl CoreError {
    /// Builds a structured not-found error for an entity and id
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Builds a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        CoreError::Conflict(message.into())
    }

    /// Builds an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        CoreError::Unauthorized(message.into())
    }

    /// Builds a container configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
