//! Shared response envelope types.
//!
//! List endpoints return `{ "data": [...], "pagination": {...} }`; use
//! [`PagedResponse`] instead of ad-hoc `serde_json::json!` envelopes.

use serde::Serialize;

/// Pagination metadata attached to every list response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Full count under the same filter, independent of the returned page.
    pub total: i64,
    pub page_offset: i64,
    pub page_size: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    /// Build metadata from the clamped paging values, the number of items
    /// actually returned, and the independent total.
    pub fn new(total: i64, page_offset: i64, page_size: i64, returned: usize) -> Self {
        let returned = returned as i64;
        Pagination {
            total,
            page_offset,
            page_size,
            has_next: page_offset + returned < total,
            has_previous: page_offset > 0,
        }
    }
}

/// Standard `{ "data": [...], "pagination": {...} }` list envelope.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}
