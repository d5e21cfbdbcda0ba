/// Generic repository over a storage backend
///
/// One repository owns one entity type and the [`FilterMap`] declaring its
/// filterable and sortable fields. All read paths apply the reserved
/// `is_deleted = false` descriptor when the entity supports soft deletion
/// and the caller did not override it, so tombstoned rows never leak by
/// accident.
///
/// Error policy: single-record operations log and propagate storage
/// errors. The paginated list operation is the deliberate exception — it
/// swallows storage errors and returns an empty page with zeroed counters
/// so a transient backend failure does not break paginated listings.
///
/// # Example
///
/// ```
/// use taskdeck_shared::models::task::{CreateTask, Task};
/// use taskdeck_shared::query::Filter;
/// use taskdeck_shared::repository::task_repository;
/// use taskdeck_shared::storage::Database;
///
/// # async fn example() -> Result<(), taskdeck_shared::storage::StorageError> {
/// let db = Database::new();
/// let repo = task_repository(&db);
///
/// let task = repo
///     .create(Task::new(CreateTask {
///         title: "write report".to_string(),
///         description: None,
///         due_date: None,
///         group_id: None,
///         assigned_to: None,
///     }))
///     .await?;
///
/// let (items, pagination) = repo
///     .list_with_filters(&[Filter::new("status", "todo")], 1, 10, None)
///     .await;
/// assert_eq!(pagination.total, 1);
/// assert_eq!(items[0].id, task.id);
/// # Ok(())
/// # }
/// ```
use std::sync::Arc;

use crate::query::{
    contains_field, paginate, Filter, FilterMap, OrderBy, Pagination, SOFT_DELETE_FIELD,
};
use crate::storage::{Backend, Record, StorageError};

/// Entity-agnostic CRUD and list operations
pub struct Repository<R: Record> {
    backend: Arc<dyn Backend<R>>,
    filters: FilterMap<R>,
}

impl<R: Record> Repository<R> {
    /// Creates a repository over a backend and its filter table
    pub fn new(backend: Arc<dyn Backend<R>>, filters: FilterMap<R>) -> Self {
        Self { backend, filters }
    }

    /// Prepends the reserved soft-delete descriptor unless the caller
    /// supplied one
    fn effective_filters(&self, caller: &[Filter]) -> Vec<Filter> {
        let mut filters = Vec::with_capacity(caller.len() + 1);
        if R::SOFT_DELETE && !contains_field(caller, SOFT_DELETE_FIELD) {
            filters.push(Filter::new(SOFT_DELETE_FIELD, false));
        }
        filters.extend_from_slice(caller);
        filters
    }

    async fn query(
        &self,
        filters: &[Filter],
        order_by: Option<&str>,
    ) -> Result<Vec<R>, StorageError> {
        let rows = self.backend.scan().await?;
        let mut rows = self.filters.apply(rows, &self.effective_filters(filters));
        if let Some(spec) = order_by {
            self.filters.apply_order(&mut rows, &OrderBy::parse(spec));
        }
        Ok(rows)
    }

    /// Looks up a record by primary key
    ///
    /// Tombstoned rows are treated as absent for soft-delete entities.
    /// Absence is `Ok(None)`, never an error.
    pub async fn get_by_id(&self, key: &R::Key) -> Result<Option<R>, StorageError> {
        let row = self.backend.fetch(key).await.map_err(|err| {
            tracing::error!(table = R::TABLE, error = %err, "get_by_id failed");
            err
        })?;
        Ok(row.filter(|r| !(R::SOFT_DELETE && r.is_deleted())))
    }

    /// Lists records matching the filters, paginated
    ///
    /// Fail-soft: a storage error yields an empty page with zeroed
    /// counters instead of propagating.
    pub async fn list_with_filters(
        &self,
        filters: &[Filter],
        page: i64,
        limit: i64,
        order_by: Option<&str>,
    ) -> (Vec<R>, Pagination) {
        match self.query(filters, order_by).await {
            Ok(rows) => paginate(rows, page, limit),
            Err(err) => {
                tracing::error!(
                    table = R::TABLE,
                    error = %err,
                    "list_with_filters failed, returning empty page"
                );
                (Vec::new(), Pagination::empty(page, limit))
            }
        }
    }

    /// Returns the first record matching the filters
    pub async fn get_one_by_filters(
        &self,
        filters: &[Filter],
        order_by: Option<&str>,
    ) -> Result<Option<R>, StorageError> {
        let rows = self.query(filters, order_by).await.map_err(|err| {
            tracing::error!(table = R::TABLE, error = %err, "get_one_by_filters failed");
            err
        })?;
        Ok(rows.into_iter().next())
    }

    /// Persists a fully materialized record
    pub async fn create(&self, row: R) -> Result<R, StorageError> {
        self.backend.insert(row).await.map_err(|err| {
            tracing::error!(table = R::TABLE, error = %err, "create failed");
            err
        })
    }

    /// Fetches a record by key and mutates it in place
    ///
    /// Returns `Ok(None)` when the target does not exist (or is
    /// tombstoned) — not an error.
    pub async fn update_by_id(
        &self,
        key: &R::Key,
        patch: impl FnOnce(&mut R) + Send + 'static,
    ) -> Result<Option<R>, StorageError> {
        if self.get_by_id(key).await?.is_none() {
            return Ok(None);
        }
        self.backend.mutate(key, Box::new(patch)).await.map_err(|err| {
            tracing::error!(table = R::TABLE, error = %err, "update_by_id failed");
            err
        })
    }

    /// Fetches the first record matching the filters and mutates it in
    /// place
    pub async fn update_one_by_filters(
        &self,
        filters: &[Filter],
        patch: impl FnOnce(&mut R) + Send + 'static,
    ) -> Result<Option<R>, StorageError> {
        let Some(row) = self.get_one_by_filters(filters, None).await? else {
            return Ok(None);
        };
        self.backend
            .mutate(&row.key(), Box::new(patch))
            .await
            .map_err(|err| {
                tracing::error!(table = R::TABLE, error = %err, "update_one_by_filters failed");
                err
            })
    }

    /// Deletes a record by primary key
    ///
    /// Soft deletion sets the tombstone flag; hard deletion removes the
    /// row. Entities without a tombstone only support physical removal, so
    /// soft degrades to hard for them. Returns `Ok(false)` when the key
    /// does not resolve to an existing, non-deleted record.
    pub async fn delete_by_id(&self, key: &R::Key, soft: bool) -> Result<bool, StorageError> {
        if self.get_by_id(key).await?.is_none() {
            return Ok(false);
        }

        let result = if soft && R::SOFT_DELETE {
            self.backend
                .mutate(key, Box::new(|row: &mut R| row.set_deleted(true)))
                .await
                .map(|updated| updated.is_some())
        } else {
            self.backend.remove(key).await
        };

        result.map_err(|err| {
            tracing::error!(table = R::TABLE, error = %err, "delete_by_id failed");
            err
        })
    }
}
