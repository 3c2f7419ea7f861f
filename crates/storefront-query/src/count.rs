//! Exhaustive product-count walk for unfiltered collections.
//!
//! The platform does not expose a total product count on a collection, so
//! the exact total is computed by paging through the whole product set and
//! summing edge counts. The walk is sequential — each page request depends
//! on the previous page's cursor — and generic over the fetch function so it
//! tests without HTTP.

use std::future::Future;

use crate::error::QueryError;
use crate::types::CountPage;

/// Page size for the count walk, the platform's per-page maximum.
pub const COUNT_PAGE_SIZE: u32 = 250;

/// Maximum number of pages to walk before returning an error.
/// Prevents infinite loops on cycling cursors.
pub(crate) const MAX_COUNT_PAGES: usize = 200;

/// Walks every page of a collection's products, following the
/// `hasNextPage`/`endCursor` chain, and returns the summed edge count.
///
/// `fetch_page` receives the cursor to resume from (`None` for the first
/// page). `handle` is only used for error context.
///
/// # Errors
///
/// Propagates any error from `fetch_page` (including the not-found signal
/// for a missing collection). Returns [`QueryError::PaginationLimit`] if the
/// walk exceeds [`MAX_COUNT_PAGES`] pages.
pub async fn count_all_pages<F, Fut>(handle: &str, mut fetch_page: F) -> Result<u64, QueryError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CountPage, QueryError>>,
{
    let mut total = 0u64;
    let mut cursor: Option<String> = None;
    let mut page_count = 0usize;

    loop {
        page_count += 1;
        if page_count > MAX_COUNT_PAGES {
            return Err(QueryError::PaginationLimit {
                handle: handle.to_owned(),
                max_pages: MAX_COUNT_PAGES,
            });
        }

        let page = fetch_page(cursor.take()).await?;
        total += page.edge_count;

        if !page.has_next_page {
            break;
        }
        cursor = page.end_cursor;
    }

    Ok(total)
}
