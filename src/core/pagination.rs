//! Page-number pagination for habit listings.
//!
//! Pages are numbered from 1 for callers and converted to the 0-based index
//! sea-orm's paginator expects.

use crate::errors::{Error, Result};

/// One page of a listing plus the totals needed to render navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, at most `page_size`
    pub items: Vec<T>,
    /// 1-based number of this page
    pub page: u64,
    /// Number of pages in the whole listing
    pub total_pages: u64,
    /// Number of items in the whole listing
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Converts a 1-based page number into the paginator's 0-based index.
pub fn page_index(page: u64) -> Result<u64> {
    page.checked_sub(1)
        .ok_or_else(|| Error::validation("Page numbers start at 1"))
}
