use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 4;
pub const MAX_PAGE_SIZE: i64 = 10;

/// Query-string pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Records per page, capped at 10
    pub page_size: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    // page is caller-controlled; saturate instead of overflowing
    pub fn offset(&self) -> i64 {
        self.page().saturating_sub(1).saturating_mul(self.limit())
    }
}

/// Paginated list envelope
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: i64, query: &PageQuery, results: Vec<T>) -> Self {
        Page {
            count,
            page: query.page(),
            page_size: query.limit(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q = PageQuery {
            page: None,
            page_size: None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_page_size_capped() {
        let q = PageQuery {
            page: Some(2),
            page_size: Some(50),
        };
        assert_eq!(q.limit(), MAX_PAGE_SIZE);
        assert_eq!(q.offset(), 10);
    }

    #[test]
    fn test_non_positive_inputs_normalized() {
        let q = PageQuery {
            page: Some(0),
            page_size: Some(0),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_huge_page_number_saturates() {
        let q = PageQuery {
            page: Some(i64::MAX),
            page_size: Some(MAX_PAGE_SIZE),
        };
        let offset = q.offset();
        assert!(offset >= 0);
        assert_eq!(offset, i64::MAX);
    }

    #[test]
    fn test_envelope() {
        let q = PageQuery {
            page: Some(3),
            page_size: Some(4),
        };
        let page = Page::new(11, &q, vec!["a", "b", "c"]);
        assert_eq!(page.count, 11);
        assert_eq!(page.page, 3);
        assert_eq!(page.page_size, 4);
        assert_eq!(page.results.len(), 3);
    }
}
