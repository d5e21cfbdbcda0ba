/// Ordering for list queries
///
/// Callers specify ordering as an optional field name, prefixed with `-`
/// for descending. Absent ordering leaves results in the storage engine's
/// default order.
use chrono::{DateTime, Utc};

/// Parsed ordering directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    /// Parses a `field` / `-field` ordering spec
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix('-') {
            Some(field) => Self {
                field: field.to_string(),
                descending: true,
            },
            None => Self {
                field: spec.to_string(),
                descending: false,
            },
        }
    }
}

/// Comparable sort key extracted from a row
///
/// Variant order defines cross-type ordering; `Missing` sorts before
/// everything so rows without a value (e.g. tasks with no due date) lead
/// ascending scans.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Missing,
    Flag(bool),
    Number(i64),
    Instant(DateTime<Utc>),
    Text(String),
}

/// Extracts the sort key for a registered field from a row
pub type SortKeyFn<R> = fn(&R) -> SortKey;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ascending() {
        let order = OrderBy::parse("created_at");
        assert_eq!(order.field, "created_at");
        assert!(!order.descending);
    }

    #[test]
    fn test_parse_descending() {
        let order = OrderBy::parse("-due_date");
        assert_eq!(order.field, "due_date");
        assert!(order.descending);
    }

    #[test]
    fn test_missing_sorts_first() {
        assert!(SortKey::Missing < SortKey::Text("a".to_string()));
        assert!(SortKey::Missing < SortKey::Instant(Utc::now()));
    }
}
