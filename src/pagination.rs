//! Page arithmetic for list queries and the page window shown under tables.

use serde::Serialize;

/// Number of rows shown per page when the request does not say otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Requested page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Page `0` is treated as the first page and a zero page size as
    /// [`DEFAULT_ITEMS_PER_PAGE`].
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: if per_page == 0 {
                DEFAULT_ITEMS_PER_PAGE
            } else {
                per_page
            },
        }
    }

    /// Rows to skip before the requested page, capped so that it still fits
    /// an SQL `OFFSET`.
    pub fn offset(&self) -> usize {
        (self.page - 1)
            .saturating_mul(self.per_page)
            .min(i64::MAX as usize)
    }

    /// Number of pages needed for `count` rows.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_ITEMS_PER_PAGE)
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }
    let current_page = current_page.min(last_page);

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of items plus the page links to render, `None` marking a gap.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: usize) -> Self {
        let pages = get_pages(pagination.total_pages(total), pagination.page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: pagination.page,
            total,
        }
    }
}
