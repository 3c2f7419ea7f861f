//! Pagination links that carry the rest of the listing state with them.
//!
//! Moving one page forward or backward must not silently drop the active
//! sort, filters, or search term — a cursor is only valid for the exact
//! query shape it was issued under, so the full shape travels in the URL.
//! Cursors past the first/last page are invalid even when the href is
//! well-formed; that edge is guarded at the navigation control
//! ([`PageLink::follow`]), not by the URL builder.

use storefront_core::{Direction, PageArgs, PageInfo, SortKey};

use crate::query_state::{
    QueryState, CURSOR_PARAM, DIRECTION_PARAM, FILTER_PARAM, REVERSE_PARAM, SEARCH_TERM_PARAM,
    SORT_KEY_PARAM,
};

/// Products shown per listing page.
pub const LISTING_PAGE_SIZE: u32 = 12;

/// Sort applied when the URL carries none.
pub const DEFAULT_SORT_KEY: SortKey = SortKey::BestSelling;

/// The orthogonal listing state a pagination link must preserve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingState {
    pub sort_key: Option<SortKey>,
    pub reverse: Option<bool>,
    /// Active filter tokens, in URL order.
    pub filters: Vec<String>,
    pub search_term: Option<String>,
}

impl ListingState {
    /// Reads the current listing state out of a query snapshot.
    #[must_use]
    pub fn from_query(query: &QueryState) -> Self {
        Self {
            sort_key: query.get(SORT_KEY_PARAM).and_then(SortKey::parse),
            reverse: query.get(REVERSE_PARAM).map(|value| value == "true"),
            filters: query
                .get_all(FILTER_PARAM)
                .into_iter()
                .map(ToOwned::to_owned)
                .collect(),
            search_term: query.get(SEARCH_TERM_PARAM).map(ToOwned::to_owned),
        }
    }
}

/// Route a pagination link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationTarget<'a> {
    Collection { handle: &'a str },
    Search,
}

/// Builds the URL for one page step, re-asserting sort (platform defaults if
/// absent, so sort is never silently lost across a page boundary), every
/// filter token in original order, and the search term in search context.
#[must_use]
pub fn build_pagination_url(
    cursor: &str,
    direction: Direction,
    state: &ListingState,
    target: PaginationTarget<'_>,
) -> String {
    let mut pairs: Vec<(String, String)> = vec![
        (DIRECTION_PARAM.to_owned(), direction.as_str().to_owned()),
        (CURSOR_PARAM.to_owned(), cursor.to_owned()),
        (
            SORT_KEY_PARAM.to_owned(),
            state.sort_key.unwrap_or(DEFAULT_SORT_KEY).as_str().to_owned(),
        ),
        (
            REVERSE_PARAM.to_owned(),
            if state.reverse.unwrap_or(false) {
                "true"
            } else {
                "false"
            }
            .to_owned(),
        ),
    ];
    for token in &state.filters {
        pairs.push((FILTER_PARAM.to_owned(), token.clone()));
    }

    match target {
        PaginationTarget::Search => {
            pairs.push((
                SEARCH_TERM_PARAM.to_owned(),
                state.search_term.clone().unwrap_or_default(),
            ));
            format!("/search?{}", QueryState::from_pairs(pairs).to_query_string())
        }
        PaginationTarget::Collection { handle } => {
            format!(
                "/collections/{handle}?{}",
                QueryState::from_pairs(pairs).to_query_string()
            )
        }
    }
}

/// A next/previous navigation control: an href plus whether following it is
/// allowed for the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub href: String,
    pub enabled: bool,
}

impl PageLink {
    /// Link to the next page, disabled when the current page is the last.
    #[must_use]
    pub fn next(page_info: &PageInfo, state: &ListingState, target: PaginationTarget<'_>) -> Self {
        Self {
            href: build_pagination_url(
                page_info.end_cursor.as_deref().unwrap_or_default(),
                Direction::Next,
                state,
                target,
            ),
            enabled: page_info.has_next_page,
        }
    }

    /// Link to the previous page, disabled when the current page is the first.
    #[must_use]
    pub fn previous(
        page_info: &PageInfo,
        state: &ListingState,
        target: PaginationTarget<'_>,
    ) -> Self {
        Self {
            href: build_pagination_url(
                page_info.start_cursor.as_deref().unwrap_or_default(),
                Direction::Previous,
                state,
                target,
            ),
            enabled: page_info.has_previous_page,
        }
    }

    /// Click-guard: the href of an enabled link, `None` otherwise. A disabled
    /// link's href may be well-formed but its cursor is past the edge.
    #[must_use]
    pub fn follow(&self) -> Option<&str> {
        self.enabled.then_some(self.href.as_str())
    }
}

/// Maps the `cursor`/`direction` pair from the URL to the Relay page window
/// sent to the platform. No direction (or a forward one) pages forward;
/// `previous` pages backward from the page's start cursor.
#[must_use]
pub fn page_args(cursor: Option<&str>, direction: Option<Direction>, page_size: u32) -> PageArgs {
    match (direction, cursor) {
        (Some(Direction::Previous), Some(cursor)) => PageArgs {
            last: Some(page_size),
            before: Some(cursor.to_owned()),
            ..PageArgs::default()
        },
        (_, cursor) => PageArgs {
            first: Some(page_size),
            after: cursor.map(ToOwned::to_owned),
            ..PageArgs::default()
        },
    }
}
