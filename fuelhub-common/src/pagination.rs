//! Pagination utilities for listing queries
//!
//! Directory and blog listings page with a caller-chosen `limit`, bounded to
//! [`MAX_LIMIT`].

use serde::Serialize;

/// Default page size for the tools directory
pub const DEFAULT_LIMIT: i64 = 12;

/// Largest page size a client may request
pub const MAX_LIMIT: i64 = 100;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Page size actually used
    pub limit: i64,
    /// Total number of matching rows
    pub total: i64,
    /// Total number of pages
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
    /// Offset for SQL LIMIT/OFFSET query
    #[serde(skip)]
    pub offset: i64,
}

/// Clamp a requested page size into `1..=MAX_LIMIT`
pub fn sanitize_limit(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
///
/// # Examples
/// ```
/// use fuelhub_common::pagination::calculate_pagination;
///
/// // 25 results at 12 per page = 3 pages (12 + 12 + 1)
/// let p = calculate_pagination(25, 2, 12);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 12);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(25, 99, 12);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 24);
/// ```
pub fn calculate_pagination(total: i64, requested_page: i64, limit: i64) -> Pagination {
    let limit = limit.clamp(1, MAX_LIMIT);
    let total = total.max(0);
    let total_pages = (total + limit - 1) / limit;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * limit;

    Pagination {
        page,
        limit,
        total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normal() {
        let p = calculate_pagination(250, 2, 100);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset, 100);
        assert!(p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn test_pagination_first_page() {
        let p = calculate_pagination(30, 1, 12);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset, 0);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_pagination_out_of_bounds_high() {
        let p = calculate_pagination(150, 99, 100);
        assert_eq!(p.page, 2); // Clamped to last page
        assert_eq!(p.offset, 100);
        assert!(!p.has_next);
    }

    #[test]
    fn test_pagination_out_of_bounds_low() {
        let p = calculate_pagination(150, 0, 100);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_empty() {
        let p = calculate_pagination(0, 3, 12);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.offset, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_pagination_exact_page_boundary() {
        let p = calculate_pagination(24, 2, 12);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 12);
    }

    #[test]
    fn test_sanitize_limit() {
        assert_eq!(sanitize_limit(None), DEFAULT_LIMIT);
        assert_eq!(sanitize_limit(Some(0)), 1);
        assert_eq!(sanitize_limit(Some(-5)), 1);
        assert_eq!(sanitize_limit(Some(500)), MAX_LIMIT);
        assert_eq!(sanitize_limit(Some(24)), 24);
    }
}
