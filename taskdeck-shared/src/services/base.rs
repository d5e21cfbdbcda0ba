/// Generic CRUD service
///
/// Wraps a [`Repository`] and binds the output projection callers see.
/// Read operations return the projection by default; the `_model` variants
/// return the raw record for the few call sites that need internal fields
/// (credential checks, orchestration). Domain errors are raised here —
/// never in the repository — starting with the structured not-found on
/// `delete_by_id`.
use std::marker::PhantomData;

use crate::error::{CoreError, CoreResult};
use crate::query::{Filter, Pagination};
use crate::repository::Repository;
use crate::storage::Record;

/// Derives the entity's human-readable label from its table name by
/// stripping the collection suffix ("group_members" → "group member")
fn entity_label(table: &str) -> String {
    table.strip_suffix('s').unwrap_or(table).replace('_', " ")
}

/// Repository wrapper bound to one entity and one output projection
pub struct CrudService<R: Record, Out> {
    repo: Repository<R>,
    entity: String,
    _out: PhantomData<fn() -> Out>,
}

impl<R: Record, Out: From<R>> CrudService<R, Out> {
    /// Creates a service over a repository
    pub fn new(repo: Repository<R>) -> Self {
        Self {
            repo,
            entity: entity_label(R::TABLE),
            _out: PhantomData,
        }
    }

    /// The wrapped repository, for callers that need raw operations
    pub fn repo(&self) -> &Repository<R> {
        &self.repo
    }

    /// Lists projected records matching the filters, paginated
    pub async fn list_with_pagination(
        &self,
        filters: &[Filter],
        page: i64,
        limit: i64,
        order_by: Option<&str>,
    ) -> (Vec<Out>, Pagination) {
        let (rows, pagination) = self
            .repo
            .list_with_filters(filters, page, limit, order_by)
            .await;
        (rows.into_iter().map(Out::from).collect(), pagination)
    }

    /// Lists every projected record matching the filters
    pub async fn list(&self, filters: &[Filter]) -> Vec<Out> {
        self.list_with_pagination(filters, 1, 0, None).await.0
    }

    /// Looks up a projected record by primary key
    pub async fn get_by_id(&self, key: &R::Key) -> CoreResult<Option<Out>> {
        Ok(self.repo.get_by_id(key).await?.map(Out::from))
    }

    /// Looks up a raw record by primary key
    pub async fn get_by_id_model(&self, key: &R::Key) -> CoreResult<Option<R>> {
        Ok(self.repo.get_by_id(key).await?)
    }

    /// Returns the first projected record matching the filters
    pub async fn get_one_by_filters(&self, filters: &[Filter]) -> CoreResult<Option<Out>> {
        Ok(self
            .repo
            .get_one_by_filters(filters, None)
            .await?
            .map(Out::from))
    }

    /// Returns the first raw record matching the filters
    pub async fn get_one_by_filters_model(&self, filters: &[Filter]) -> CoreResult<Option<R>> {
        Ok(self.repo.get_one_by_filters(filters, None).await?)
    }

    /// Persists a record and returns its projection
    pub async fn create(&self, row: R) -> CoreResult<Out> {
        Ok(Out::from(self.repo.create(row).await?))
    }

    /// Persists a record and returns the raw stored form
    pub async fn create_model(&self, row: R) -> CoreResult<R> {
        Ok(self.repo.create(row).await?)
    }

    /// Patches a record by primary key, returning its projection
    ///
    /// A missing target is `Ok(None)`, not an error.
    pub async fn update_by_id(
        &self,
        key: &R::Key,
        patch: impl FnOnce(&mut R) + Send + 'static,
    ) -> CoreResult<Option<Out>> {
        Ok(self.repo.update_by_id(key, patch).await?.map(Out::from))
    }

    /// Patches the first record matching the filters, returning its
    /// projection
    pub async fn update_one_by_filters(
        &self,
        filters: &[Filter],
        patch: impl FnOnce(&mut R) + Send + 'static,
    ) -> CoreResult<Option<Out>> {
        Ok(self
            .repo
            .update_one_by_filters(filters, patch)
            .await?
            .map(Out::from))
    }

    /// Deletes a record by primary key
    ///
    /// Confirms existence first and raises a structured not-found — the
    /// repository's silent `false` is not enough for callers that map
    /// errors to responses.
    pub async fn delete_by_id(&self, key: &R::Key, soft: bool) -> CoreResult<()> {
        if self.repo.get_by_id(key).await?.is_none() {
            return Err(CoreError::not_found(self.entity.clone(), key));
        }
        self.repo.delete_by_id(key, soft).await?;
        Ok(())
    }
}
