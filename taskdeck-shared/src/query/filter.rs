/// Filter descriptors and per-repository composition tables
///
/// A [`FilterMap`] is an explicit ordered list of `(field, predicate)`
/// pairs plus `(field, sort key)` pairs. Repositories start from
/// [`FilterMap::base`] (the `id` and reserved `is_deleted` fields) and
/// append their own entries; a later entry for the same field overrides an
/// earlier one, which is how a concrete repository replaces a base
/// predicate.
///
/// Descriptors whose field has no registered predicate are skipped
/// silently: unrecognized filters are no-ops, not failures, so callers can
/// send forward-compatible filter lists.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::order::{OrderBy, SortKeyFn};
use crate::storage::Record;

/// Reserved filter field carrying the soft-delete tombstone
pub const SOFT_DELETE_FIELD: &str = "is_deleted";

/// A single filter descriptor supplied by a caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    /// Builds a descriptor from a field name and any JSON-representable
    /// value
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Returns whether a descriptor list names the given field
pub fn contains_field(filters: &[Filter], field: &str) -> bool {
    filters.iter().any(|f| f.field == field)
}

/// Predicate deciding whether a row matches a descriptor value
pub type Predicate<R> = fn(&R, &Value) -> bool;

/// Ordered composition table of filterable and sortable fields
#[derive(Clone)]
pub struct FilterMap<R> {
    predicates: Vec<(&'static str, Predicate<R>)>,
    sort_keys: Vec<(&'static str, SortKeyFn<R>)>,
}

impl<R: Record> FilterMap<R> {
    /// Creates an empty table
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            sort_keys: Vec::new(),
        }
    }

    /// Creates the base table shared by every repository: lookup by
    /// primary key and the reserved `is_deleted` field
    pub fn base() -> Self {
        Self::new()
            .filter("id", |row: &R, value| {
                value
                    .as_str()
                    .map_or(false, |id| row.key().to_string() == id)
            })
            .filter(SOFT_DELETE_FIELD, |row: &R, value| {
                value.as_bool().map_or(false, |flag| row.is_deleted() == flag)
            })
    }

    /// Appends a filterable field; overrides any earlier entry for the
    /// same field
    pub fn filter(mut self, field: &'static str, predicate: Predicate<R>) -> Self {
        self.predicates.push((field, predicate));
        self
    }

    /// Appends a sortable field
    pub fn order(mut self, field: &'static str, key: SortKeyFn<R>) -> Self {
        self.sort_keys.push((field, key));
        self
    }

    fn predicate(&self, field: &str) -> Option<Predicate<R>> {
        self.predicates
            .iter()
            .rev()
            .find(|(name, _)| *name == field)
            .map(|(_, predicate)| *predicate)
    }

    fn sort_key(&self, field: &str) -> Option<SortKeyFn<R>> {
        self.sort_keys
            .iter()
            .rev()
            .find(|(name, _)| *name == field)
            .map(|(_, key)| *key)
    }

    /// Narrows rows by walking the descriptor list in order
    pub fn apply(&self, mut rows: Vec<R>, filters: &[Filter]) -> Vec<R> {
        for filter in filters {
            match self.predicate(&filter.field) {
                Some(predicate) => rows.retain(|row| predicate(row, &filter.value)),
                None => {
                    tracing::debug!(field = %filter.field, "ignoring unknown filter field");
                }
            }
        }
        rows
    }

    /// Sorts rows by a registered sort field; unknown fields leave the
    /// storage order untouched
    pub fn apply_order(&self, rows: &mut [R], order: &OrderBy) {
        if let Some(key) = self.sort_key(&order.field) {
            rows.sort_by(|a, b| {
                let ordering = key(a).cmp(&key(b));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
    }
}

impl<R: Record> Default for FilterMap<R> {
    fn default() -> Self {
        Self::new()
    }
}
