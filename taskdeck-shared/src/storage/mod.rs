/// Storage-engine contract and the in-process table engine
///
/// The repository layer never talks to a concrete database. It sees the
/// [`Backend`] trait — the minimal ORM-like surface it needs: get by
/// primary key, enumerate rows, construct records, mutate fields in place,
/// and delete. [`Table`] is the engine shipped with the backend: an
/// insertion-ordered, lock-guarded row store that enforces primary-key
/// uniqueness (which is what keeps a (group, user) membership pair unique).
///
/// # Example
///
/// ```
/// use taskdeck_shared::models::user::{CreateUser, User};
/// use taskdeck_shared::storage::{Backend, Table};
///
/// # async fn example() -> Result<(), taskdeck_shared::storage::StorageError> {
/// let table: Table<User> = Table::new();
/// let user = table
///     .insert(User::new(CreateUser {
///         email: "user@example.com".to_string(),
///         username: None,
///         password_hash: "$argon2id$...".to_string(),
///         full_name: "Jane Doe".to_string(),
///     }))
///     .await?;
///
/// assert!(table.fetch(&user.id).await?.is_some());
/// # Ok(())
/// # }
/// ```
use std::fmt;

use async_trait::async_trait;

pub mod database;
pub mod table;

pub use database::Database;
pub use table::Table;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Primary-key uniqueness violation
    #[error("duplicate key '{key}' in table '{table}'")]
    DuplicateKey { table: &'static str, key: String },

    /// Unexpected engine failure
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// A persistable domain record
///
/// Every entity declares its primary-key type, its table name, and whether
/// it carries a soft-delete tombstone. Entities without a tombstone keep
/// the no-op defaults.
pub trait Record: Clone + Send + Sync + 'static {
    /// Primary-key type (`Display` so keys can appear in error messages)
    type Key: Clone + Eq + fmt::Display + Send + Sync + 'static;

    /// Table name, also the source of the entity's human-readable label
    const TABLE: &'static str;

    /// Whether rows carry an `is_deleted` tombstone flag
    const SOFT_DELETE: bool = false;

    /// Returns the record's primary key
    fn key(&self) -> Self::Key;

    /// Tombstone state; always false for entities without one
    fn is_deleted(&self) -> bool {
        false
    }

    /// Sets the tombstone; no-op for entities without one
    fn set_deleted(&mut self, _deleted: bool) {}
}

/// In-place mutation applied by [`Backend::mutate`]
pub type Mutation<R> = Box<dyn FnOnce(&mut R) + Send>;

/// The minimal query surface the repository layer requires of a storage
/// engine
#[async_trait]
pub trait Backend<R: Record>: Send + Sync {
    /// Looks up a row by primary key
    async fn fetch(&self, key: &R::Key) -> Result<Option<R>, StorageError>;

    /// Enumerates every row in the engine's default (insertion) order
    async fn scan(&self) -> Result<Vec<R>, StorageError>;

    /// Persists a new row, rejecting duplicate primary keys
    async fn insert(&self, row: R) -> Result<R, StorageError>;

    /// Mutates a row in place, returning the updated row if the key exists
    async fn mutate(&self, key: &R::Key, mutation: Mutation<R>)
        -> Result<Option<R>, StorageError>;

    /// Physically removes a row, returning whether it existed
    async fn remove(&self, key: &R::Key) -> Result<bool, StorageError>;

    /// Counts all rows, tombstoned ones included
    async fn count(&self) -> Result<usize, StorageError>;
}
