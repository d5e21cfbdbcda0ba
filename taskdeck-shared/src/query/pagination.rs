/// Pagination for list queries
///
/// `page` is floored to 1. A non-positive `limit` is a sentinel meaning
/// "return everything as a single page"; otherwise the returned slice is
/// `[(page-1)*limit, (page-1)*limit + limit)` and
/// `total_pages = ceil(total / limit)`.
use serde::{Deserialize, Serialize};

/// Pagination counters returned next to a page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Zeroed counters, returned when a list query fails soft
    pub fn empty(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            total: 0,
            total_pages: 0,
        }
    }
}

/// Slices rows into the requested page
pub fn paginate<R>(rows: Vec<R>, page: i64, limit: i64) -> (Vec<R>, Pagination) {
    let total = rows.len() as i64;

    if limit <= 0 {
        let pagination = Pagination {
            page: 1,
            limit,
            total,
            total_pages: 1,
        };
        return (rows, pagination);
    }

    let page = page.max(1);
    let total_pages = (total + limit - 1) / limit;
    let offset = ((page - 1) * limit) as usize;

    let items: Vec<R> = rows
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .collect();

    (
        items,
        Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        let rows: Vec<i32> = (0..25).collect();
        let (items, pagination) = paginate(rows, 1, 10);
        assert_eq!(items.len(), 10);
        assert_eq!(pagination.total, 25);
        assert_eq!(pagination.total_pages, 3);
    }

    #[test]
    fn test_last_page_is_short() {
        let rows: Vec<i32> = (0..25).collect();
        let (items, pagination) = paginate(rows, 3, 10);
        assert_eq!(items, vec![20, 21, 22, 23, 24]);
        assert_eq!(pagination.page, 3);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let rows: Vec<i32> = (0..5).collect();
        let (items, pagination) = paginate(rows, 9, 10);
        assert!(items.is_empty());
        assert_eq!(pagination.total, 5);
        assert_eq!(pagination.total_pages, 1);
    }

    #[test]
    fn test_page_is_floored_to_one() {
        let rows: Vec<i32> = (0..5).collect();
        let (items, pagination) = paginate(rows, 0, 2);
        assert_eq!(items, vec![0, 1]);
        assert_eq!(pagination.page, 1);
    }

    #[test]
    fn test_non_positive_limit_returns_everything() {
        let rows: Vec<i32> = (0..42).collect();
        let (items, pagination) = paginate(rows, 3, 0);
        assert_eq!(items.len(), 42);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total, 42);
        assert_eq!(pagination.total_pages, 1);
    }

    #[test]
    fn test_slice_never_exceeds_limit() {
        for page in 1..6 {
            let rows: Vec<i32> = (0..17).collect();
            let (items, _) = paginate(rows, page, 4);
            assert!(items.len() <= 4);
        }
    }
}
