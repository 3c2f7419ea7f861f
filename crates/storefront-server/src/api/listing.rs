//! Listing routes: decode the listing URL state, query the storefront API,
//! and reshape the response for the front end — facet columns in stable
//! display order plus prebuilt next/previous links that carry the full
//! filter/sort/term state.

use axum::{
    extract::{Path, RawQuery, State},
    Extension, Json,
};
use serde::Serialize;

use storefront_core::{Direction, FacetValue, PageInfo};
use storefront_filter::{
    display_values, page_args,
    query_state::{CURSOR_PARAM, DIRECTION_PARAM, SEARCH_TERM_PARAM},
    FacetOrderCache, ListingState, PageLink, PaginationTarget, QueryState, LISTING_PAGE_SIZE,
};
use storefront_query::{parse_filter_tokens, ListingRequest, SearchRequest};

use crate::middleware::RequestId;

use super::{map_query_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ListingData {
    facets: Vec<FacetColumn>,
    nodes: Vec<serde_json::Value>,
    page_info: PageInfo,
    next: PageLinkData,
    previous: PageLinkData,
}

#[derive(Debug, Serialize)]
pub(super) struct FacetColumn {
    id: String,
    label: String,
    values: Vec<FacetValue>,
}

#[derive(Debug, Serialize)]
pub(super) struct PageLinkData {
    href: String,
    enabled: bool,
}

impl From<PageLink> for PageLinkData {
    fn from(link: PageLink) -> Self {
        Self {
            href: link.href,
            enabled: link.enabled,
        }
    }
}

pub(super) async fn collection_listing(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ApiResponse<ListingData>>, ApiError> {
    let query = QueryState::parse(raw.as_deref().unwrap_or(""));
    let listing_state = ListingState::from_query(&query);

    let request = ListingRequest {
        handle: handle.clone(),
        filters: parse_filter_tokens(&listing_state.filters),
        sort_key: listing_state.sort_key,
        reverse: listing_state.reverse.unwrap_or(false),
        page: page_args(
            query.get(CURSOR_PARAM),
            query.get(DIRECTION_PARAM).and_then(Direction::parse),
            LISTING_PAGE_SIZE,
        ),
    };

    let page = state
        .client
        .collection_listing(&request)
        .await
        .map_err(|e| map_query_error(req_id.0.clone(), &e))?;

    let data = reshape(
        page,
        &listing_state,
        PaginationTarget::Collection { handle: &handle },
    );
    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn search_listing(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ApiResponse<ListingData>>, ApiError> {
    let query = QueryState::parse(raw.as_deref().unwrap_or(""));
    let listing_state = ListingState::from_query(&query);

    let request = SearchRequest {
        term: query.get(SEARCH_TERM_PARAM).unwrap_or_default().to_owned(),
        filters: parse_filter_tokens(&listing_state.filters),
        sort_key: listing_state.sort_key,
        reverse: listing_state.reverse.unwrap_or(false),
        page: page_args(
            query.get(CURSOR_PARAM),
            query.get(DIRECTION_PARAM).and_then(Direction::parse),
            LISTING_PAGE_SIZE,
        ),
    };

    let page = state
        .client
        .search_listing(&request)
        .await
        .map_err(|e| map_query_error(req_id.0.clone(), &e))?;

    let data = reshape(page, &listing_state, PaginationTarget::Search);
    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Reorders each facet group for display and attaches page links.
///
/// The order cache here is per-response: it applies the canonical merge and
/// legacy exclusion server-side. First-seen stability across re-renders
/// belongs to the caller that owns a column for its whole lifetime.
fn reshape(
    page: storefront_query::ListingPage,
    listing_state: &ListingState,
    target: PaginationTarget<'_>,
) -> ListingData {
    let mut order_cache = FacetOrderCache::new();
    let facets = page
        .facet_groups
        .iter()
        .map(|group| FacetColumn {
            id: group.id.clone(),
            label: group.label.clone(),
            values: display_values(group, &mut order_cache),
        })
        .collect();

    ListingData {
        facets,
        nodes: page.nodes,
        next: PageLink::next(&page.page_info, listing_state, target).into(),
        previous: PageLink::previous(&page.page_info, listing_state, target).into(),
        page_info: page.page_info,
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::FacetGroup;
    use storefront_query::ListingPage;

    use super::*;

    fn page_with_categories() -> ListingPage {
        ListingPage {
            facet_groups: vec![FacetGroup {
                id: "filter.p.product_type".to_owned(),
                label: "Categories".to_owned(),
                presentation: Some("TEXT".to_owned()),
                group_type: Some("LIST".to_owned()),
                values: vec![FacetValue {
                    id: "v1".to_owned(),
                    label: "Apparel".to_owned(),
                    input: r#"{"productType":"Apparel"}"#.to_owned(),
                    count: 5,
                    swatch: None,
                }],
            }],
            nodes: vec![serde_json::json!({"id": "gid://shopify/Product/1"})],
            page_info: PageInfo {
                has_next_page: true,
                has_previous_page: false,
                start_cursor: Some("first".to_owned()),
                end_cursor: Some("last".to_owned()),
            },
        }
    }

    #[test]
    fn reshape_completes_the_canonical_category_column() {
        let state = ListingState::default();
        let data = reshape(
            page_with_categories(),
            &state,
            PaginationTarget::Collection { handle: "shirts" },
        );

        // One canonical entry per taxonomy slot, present or not.
        assert_eq!(data.facets.len(), 1);
        assert_eq!(data.facets[0].values.len(), 7);
        assert_eq!(data.facets[0].values[1].label, "Apparel");
        assert_eq!(data.facets[0].values[1].count, 5);
        assert_eq!(data.facets[0].values[0].count, 0);
    }

    #[test]
    fn reshape_builds_guarded_page_links() {
        let state = ListingState::default();
        let data = reshape(
            page_with_categories(),
            &state,
            PaginationTarget::Collection { handle: "shirts" },
        );

        assert!(data.next.enabled);
        assert!(data.next.href.starts_with("/collections/shirts?"));
        assert!(data.next.href.contains("cursor=last"));
        assert!(!data.previous.enabled, "first page has no previous");
    }

    #[test]
    fn reshape_search_target_links_to_search_route() {
        let state = ListingState {
            search_term: Some("tote".to_owned()),
            ..ListingState::default()
        };
        let data = reshape(page_with_categories(), &state, PaginationTarget::Search);
        assert!(data.next.href.starts_with("/search?"));
        assert!(data.next.href.contains("q=tote"));
    }
}
