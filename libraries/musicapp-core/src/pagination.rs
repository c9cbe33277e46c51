//! Page requests and paginated results

use serde::Serialize;

/// Default page size for artist listings
pub const ARTISTS_PER_PAGE: i64 = 10;

/// Default page size for album listings
pub const ALBUMS_PER_PAGE: i64 = 5;

/// Upper bound on `per_page` unless configured otherwise
pub const MAX_PER_PAGE: i64 = 100;

/// A sanitized page request
///
/// `page` is 1-indexed and at least 1. `per_page` is at least 1 and at most
/// the cap it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page (1-indexed)
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

impl PageRequest {
    /// Build a page request from optional client parameters
    ///
    /// Missing or non-positive `per_page` falls back to `default_per_page`;
    /// values above `max_per_page` are capped. Missing or non-positive
    /// `page` becomes 1.
    pub fn new(
        page: Option<i64>,
        per_page: Option<i64>,
        default_per_page: i64,
        max_per_page: i64,
    ) -> Self {
        let per_page = per_page
            .filter(|n| *n > 0)
            .unwrap_or(default_per_page)
            .min(max_per_page.max(1));
        let page = page.filter(|n| *n > 0).unwrap_or(1);
        Self { page, per_page }
    }

    /// Row offset for SQL `LIMIT/OFFSET`
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Row limit for SQL `LIMIT/OFFSET`
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Number of the last page for `total` items, never less than 1
pub fn last_page(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 1;
    }
    (total + per_page - 1) / per_page
}

/// One page of results plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Page<T> {
    /// Current page number (1-indexed)
    pub current_page: i64,
    /// Items per page
    pub per_page: i64,
    /// Last page number
    pub last_page: i64,
    /// Total number of matching items
    pub total: i64,
    /// Items on this page
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page from the rows fetched for `request` and the total count
    pub fn new(data: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            current_page: request.page,
            per_page: request.per_page,
            last_page: last_page(total, request.per_page),
            total,
            data,
        }
    }
}
