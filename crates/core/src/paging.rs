//! Pagination clamping shared by repositories and handlers.

/// Default page size when the caller omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Hard cap on `pageSize`.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Clamp a requested page size into `[1, MAX_PAGE_SIZE]`, defaulting when
/// absent or non-positive.
pub fn clamp_page_size(requested: Option<i64>) -> i64 {
    match requested {
        Some(n) if n >= 1 => n.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Clamp a requested page offset to be non-negative.
pub fn clamp_page_offset(requested: Option<i64>) -> i64 {
    requested.unwrap_or(0).max(0)
}
