/// Query filter engine
///
/// Callers narrow queries with declarative [`Filter`] descriptors
/// (`{field, value}` pairs). Each repository declares which fields are
/// filterable and sortable through a [`FilterMap`] composition table;
/// everything else — descriptor walking, the unknown-field no-op policy,
/// ordering, pagination — lives here, so concrete repositories never
/// hand-write query logic per field combination.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use taskdeck_shared::query::Filter;
///
/// let filters = vec![
///     Filter::new("status", "todo"),
///     Filter::new("is_deleted", json!(false)),
/// ];
/// assert_eq!(filters[0].field, "status");
/// ```

pub mod filter;
pub mod order;
pub mod pagination;

pub use filter::{contains_field, Filter, FilterMap, Predicate, SOFT_DELETE_FIELD};
pub use order::{OrderBy, SortKey, SortKeyFn};
pub use pagination::{paginate, Pagination};
