//! Page-index arithmetic for the todo list.
//!
//! Pages are zero-based. `limit` is the page size and is never zero.

use crate::types::ListParams;

/// Page size used by the list view unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(limit: u64) -> Self {
        Self {
            page: 0,
            limit: limit.max(1),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.page * self.limit
    }

    pub fn params(&self) -> ListParams {
        ListParams::page(self.limit, self.offset())
    }

    /// `ceil(total / limit)`.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self, total: u64) -> bool {
        self.page + 1 < self.total_pages(total)
    }

    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Advance one page, never past the last page for `total` items.
    pub fn next(&mut self, total: u64) {
        if self.has_next(total) {
            self.page += 1;
        }
    }

    /// Jump to `page`, clamped to `[0, total_pages - 1]`.
    pub fn go_to(&mut self, page: u64, total: u64) {
        let last = self.total_pages(total).saturating_sub(1);
        self.page = page.min(last);
    }

    /// One-based inclusive item range shown on this page, as
    /// `(first, last)`. `first` exceeds `last` when the page is empty.
    pub fn item_range(&self, total: u64) -> (u64, u64) {
        let first = self.offset() + 1;
        let last = ((self.page + 1) * self.limit).min(total);
        (first, last)
    }
}
