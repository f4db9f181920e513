//! Pagination utilities for service layer
//!
//! Two conventions coexist: lawyer listings use a 1-based page index
//! ([`Pagination`]), while progress and merchant listings treat `page` as a
//! raw row offset ([`OffsetWindow`]).

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `u64` (page index is 0-based on return)
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 10 } }
}

/// `OFFSET offset LIMIT limit` window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffsetWindow {
    pub offset: u64,
    pub limit: u64,
}

impl OffsetWindow {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;
    /// SQL binds offsets as signed 64-bit integers.
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    /// `limit` is clamped to `[1, MAX_LIMIT]`; a missing one falls back to the default.
    /// Offsets past `MAX_OFFSET` are pinned to it, which still selects nothing.
    pub fn new(offset: u64, limit: Option<u64>) -> Self {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT);
        Self { offset: offset.min(Self::MAX_OFFSET), limit }
    }
}

impl Default for OffsetWindow {
    fn default() -> Self { Self::new(0, None) }
}

/// One window of rows plus the total matching count.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub total: u64,
}
