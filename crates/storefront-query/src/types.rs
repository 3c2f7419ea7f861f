//! Request and response shapes for the storefront GraphQL API.
//!
//! Listing responses are only partially typed: facet groups and page info
//! are decoded into domain types because the filter core reshapes them;
//! product nodes pass through as raw JSON since the server returns them to
//! the front end untouched.

use serde::Deserialize;

use storefront_core::{FacetGroup, PageArgs, PageInfo, SortKey};

/// A collection listing query: which products to fetch and how.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub handle: String,
    /// Structured filter constraints, parsed from their URL token form.
    pub filters: Vec<serde_json::Value>,
    /// `None` falls back to the platform default for the operation.
    pub sort_key: Option<SortKey>,
    pub reverse: bool,
    pub page: PageArgs,
}

/// A product search query. Same shape as a collection listing, keyed by a
/// search term instead of a collection handle.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub term: String,
    pub filters: Vec<serde_json::Value>,
    pub sort_key: Option<SortKey>,
    pub reverse: bool,
    pub page: PageArgs,
}

/// One page of listing results.
#[derive(Debug)]
pub struct ListingPage {
    pub facet_groups: Vec<FacetGroup>,
    pub nodes: Vec<serde_json::Value>,
    pub page_info: PageInfo,
}

/// One page of the exhaustive product-count walk.
#[derive(Debug, Clone)]
pub struct CountPage {
    pub edge_count: u64,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// Parses URL filter tokens into the structured constraint values the API
/// expects. A token that is not valid JSON cannot be expressed as a platform
/// constraint; it is skipped (with a debug log) rather than failing the
/// whole request.
#[must_use]
pub fn parse_filter_tokens(tokens: &[String]) -> Vec<serde_json::Value> {
    tokens
        .iter()
        .filter_map(|token| match serde_json::from_str(token) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::debug!(token, "skipping non-JSON filter token");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Wire envelope and data shapes (internal)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlEnvelope {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorItem>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorItem {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionListingData {
    pub collection: Option<CollectionListing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionListing {
    pub products: ProductConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductConnection {
    #[serde(default)]
    pub filters: Vec<FacetGroup>,
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchListingData {
    pub search: SearchConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchConnection {
    #[serde(default)]
    pub product_filters: Vec<FacetGroup>,
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountData {
    pub collection: Option<CountCollection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountCollection {
    pub products: CountConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CountConnection {
    pub page_info: CountPageInfo,
    #[serde(default)]
    pub edges: Vec<serde_json::Value>,
}

/// Count pages only request the forward half of page info.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CountPageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_filter_tokens_keeps_structured_tokens() {
        let tokens = vec![
            r#"{"color":"red"}"#.to_owned(),
            r#"{"productType":"Apparel"}"#.to_owned(),
        ];
        let parsed = parse_filter_tokens(&tokens);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], serde_json::json!({"color": "red"}));
    }

    #[test]
    fn parse_filter_tokens_skips_opaque_tokens() {
        let tokens = vec!["apparel".to_owned(), r#"{"color":"red"}"#.to_owned()];
        let parsed = parse_filter_tokens(&tokens);
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn envelope_tolerates_missing_errors_field() {
        let envelope: GraphQlEnvelope =
            serde_json::from_str(r#"{"data": {"collection": null}}"#).unwrap();
        assert!(envelope.data.is_some());
        assert!(envelope.errors.is_none());
    }
}
