//! Pagination primitives shared across all list endpoints.
//!
//! A [`Page`] is a plain item list plus a separate [`PageMeta`] record.
//! [`paginate`] builds one from any [`PageSource`] using a count followed by
//! a skip/take slice. Page index and page size are normalized by the caller
//! (see [`Pagination`]); the paginator itself trusts what it is given.

use std::future::{self, Future};
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Page sizes a client may ask for.
pub const ALLOWED_PAGE_SIZES: [i64; 4] = [6, 12, 24, 48];

/// Page size used when the requested one is not allowed.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Number of page links shown around the current page.
pub const DEFAULT_PAGE_WINDOW: i64 = 5;

/// Clamp a requested page index to the first page.
pub fn normalize_page_index(page: i64) -> i64 {
    page.max(1)
}

/// Replace a page size outside [`ALLOWED_PAGE_SIZES`] with the default.
pub fn normalize_page_size(page_size: i64) -> i64 {
    if ALLOWED_PAGE_SIZES.contains(&page_size) {
        page_size
    } else {
        DEFAULT_PAGE_SIZE
    }
}

/// Pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl Pagination {
    pub fn page_index(&self) -> i64 {
        normalize_page_index(self.page.unwrap_or(1))
    }

    pub fn page_size(&self) -> i64 {
        normalize_page_size(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }
}

/// Navigation metadata for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page_index: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub first_item_index: i64,
    pub last_item_index: i64,
}

impl PageMeta {
    pub fn new(total_count: i64, page_index: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            total_count.saturating_add(page_size - 1) / page_size
        } else {
            0
        };

        Self {
            page_index,
            page_size,
            total_count,
            total_pages,
            has_previous_page: page_index > 1,
            has_next_page: page_index < total_pages,
            // Not special-cased for empty results: page 1 of nothing starts at 1.
            first_item_index: page_index
                .saturating_sub(1)
                .saturating_mul(page_size)
                .saturating_add(1),
            last_item_index: page_index.saturating_mul(page_size).min(total_count),
        }
    }

    /// Page numbers to show in a pager of `window` links, centered on the
    /// current page and shifted left near the end.
    pub fn page_numbers(&self, window: i64) -> RangeInclusive<i64> {
        let mut start = self.page_index.saturating_sub(window / 2).max(1);
        let end = self.total_pages.min(start.saturating_add(window - 1));

        if end - start + 1 < window {
            start = (end - window + 1).max(1);
        }

        start..=end
    }
}

/// One bounded slice of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, page_index: i64, page_size: i64) -> Self {
        Self {
            items,
            meta: PageMeta::new(total_count, page_index, page_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the items while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// A result source that can be counted and sliced.
pub trait PageSource: Sync {
    type Item: Send;

    /// Total number of items across all pages.
    fn count(&self) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Skip `offset` items and take at most `limit`.
    fn slice(
        &self,
        offset: i64,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Self::Item>, AppError>> + Send;
}

/// Already materialized items.
impl<T: Clone + Send + Sync> PageSource for [T] {
    type Item = T;

    fn count(&self) -> impl Future<Output = Result<i64, AppError>> + Send {
        future::ready(Ok(self.len() as i64))
    }

    fn slice(
        &self,
        offset: i64,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<T>, AppError>> + Send {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        let items = self.iter().skip(offset).take(limit).cloned().collect();
        future::ready(Ok(items))
    }
}

/// Fetch one page from `source`.
///
/// Runs a count then a slice; the two are not atomic with respect to
/// concurrent writes. An offset past the end yields an empty page.
pub async fn paginate<S>(
    source: &S,
    page_index: i64,
    page_size: i64,
) -> Result<Page<S::Item>, AppError>
where
    S: PageSource + ?Sized,
{
    let total = source.count().await?;
    // Saturates at i64::MAX for absurd page indexes, which is past any total.
    let offset = page_index.saturating_sub(1).saturating_mul(page_size).max(0);

    let items = if offset >= total {
        Vec::new()
    } else {
        source.slice(offset, page_size.max(0)).await?
    };

    Ok(Page::new(items, total, page_index, page_size))
}
