//! HTTP client for the commerce platform's GraphQL storefront API.
//!
//! One POST endpoint, token-authenticated, JSON envelope with `data` +
//! `errors`. The client owns the GraphQL documents for the three operations
//! the listing subsystem needs: collection listing, product search, and the
//! per-page slice of the exhaustive product-count walk.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use storefront_core::{PageArgs, SortKey};

use crate::count::{count_all_pages, COUNT_PAGE_SIZE};
use crate::error::QueryError;
use crate::retry::retry_with_backoff;
use crate::types::{
    CollectionListingData, CountData, CountPage, GraphQlEnvelope, ListingPage, ListingRequest,
    SearchListingData, SearchRequest,
};

/// Storefront API version the client speaks.
const API_VERSION: &str = "2024-10";

const PRODUCT_NODE_FRAGMENT: &str = r"
  fragment ProductNode on Product {
    id
    handle
    title
    featuredImage {
      id
      altText
      url
      width
      height
    }
    priceRange {
      minVariantPrice {
        amount
        currencyCode
      }
      maxVariantPrice {
        amount
        currencyCode
      }
    }
  }
";

const COLLECTION_LISTING_QUERY: &str = r"
  query CollectionListing(
    $handle: String!
    $filters: [ProductFilter!]
    $sortKey: ProductCollectionSortKeys
    $reverse: Boolean
    $first: Int
    $last: Int
    $after: String
    $before: String
  ) {
    collection(handle: $handle) {
      handle
      title
      products(
        first: $first
        last: $last
        after: $after
        before: $before
        filters: $filters
        sortKey: $sortKey
        reverse: $reverse
      ) {
        filters {
          id
          label
          presentation
          type
          values {
            id
            label
            input
            count
            swatch {
              color
            }
          }
        }
        nodes {
          ...ProductNode
        }
        pageInfo {
          hasNextPage
          hasPreviousPage
          startCursor
          endCursor
        }
      }
    }
  }
";

const SEARCH_LISTING_QUERY: &str = r"
  query SearchListing(
    $term: String!
    $filters: [ProductFilter!]
    $sortKey: SearchSortKeys
    $reverse: Boolean
    $first: Int
    $last: Int
    $after: String
    $before: String
  ) {
    search(
      query: $term
      types: [PRODUCT]
      productFilters: $filters
      sortKey: $sortKey
      reverse: $reverse
      first: $first
      last: $last
      after: $after
      before: $before
    ) {
      productFilters {
        id
        label
        presentation
        type
        values {
          id
          label
          input
          count
          swatch {
            color
          }
        }
      }
      nodes {
        ... on Product {
          ...ProductNode
        }
      }
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
    }
  }
";

const COLLECTION_COUNT_QUERY: &str = r"
  query CollectionProductCount($handle: String!, $cursor: String, $pageSize: Int!) {
    collection(handle: $handle) {
      products(first: $pageSize, after: $cursor) {
        pageInfo {
          hasNextPage
          endCursor
        }
        edges {
          node {
            id
          }
        }
      }
    }
  }
";

/// Client for the storefront GraphQL API.
///
/// Transient errors (429, network failures) are automatically retried with
/// exponential backoff up to `max_retries` additional attempts; everything
/// else propagates to the caller on the first failure.
pub struct StorefrontClient {
    client: Client,
    endpoint: String,
    access_token: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl StorefrontClient {
    /// Creates a client for the given shop with configured timeout and retry
    /// policy. Any path on `shop_url` is stripped; the GraphQL endpoint
    /// always lives at the store root.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidShopUrl`] if `shop_url` does not parse,
    /// or [`QueryError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        shop_url: &str,
        access_token: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("storefront/0.1 (listing-api)")
            .build()?;
        Ok(Self {
            client,
            endpoint: Self::graphql_endpoint(shop_url)?,
            access_token: access_token.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds the GraphQL endpoint URL from a shop URL, stripping any path
    /// (e.g. a `/collections/all` landing page in the configured URL).
    fn graphql_endpoint(shop_url: &str) -> Result<String, QueryError> {
        let url =
            reqwest::Url::parse(shop_url).map_err(|e| QueryError::InvalidShopUrl {
                shop_url: shop_url.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(format!(
            "{}/api/{API_VERSION}/graphql.json",
            url.origin().ascii_serialization()
        ))
    }

    /// Fetches one page of a collection listing: facet groups, product
    /// nodes, and page info for the requested filter/sort/page window.
    ///
    /// # Errors
    ///
    /// - [`QueryError::CollectionNotFound`] — no collection for the handle.
    /// - [`QueryError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`QueryError::Api`] — the API reported GraphQL errors.
    /// - [`QueryError::Http`] / [`QueryError::UnexpectedStatus`] /
    ///   [`QueryError::Deserialize`] — transport or shape failures.
    pub async fn collection_listing(
        &self,
        request: &ListingRequest,
    ) -> Result<ListingPage, QueryError> {
        let document = format!("{COLLECTION_LISTING_QUERY}{PRODUCT_NODE_FRAGMENT}");
        let mut variables = json!({
            "handle": request.handle,
            "filters": request.filters,
            "sortKey": request.sort_key.unwrap_or(SortKey::BestSelling),
            "reverse": request.reverse,
        });
        merge_page_args(&mut variables, &request.page);

        let context = format!("collection listing for {}", request.handle);
        let data = self.execute(&document, variables, &context).await?;
        let decoded: CollectionListingData = decode(data, &context)?;
        let listing = decoded
            .collection
            .ok_or_else(|| QueryError::CollectionNotFound {
                handle: request.handle.clone(),
            })?;

        Ok(ListingPage {
            facet_groups: listing.products.filters,
            nodes: listing.products.nodes,
            page_info: listing.products.page_info,
        })
    }

    /// Fetches one page of product search results for a term.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::collection_listing`], minus the not-found
    /// case — an unmatched term is an empty result set, not an error.
    pub async fn search_listing(&self, request: &SearchRequest) -> Result<ListingPage, QueryError> {
        let document = format!("{SEARCH_LISTING_QUERY}{PRODUCT_NODE_FRAGMENT}");
        let mut variables = json!({
            "term": request.term,
            "filters": request.filters,
            "sortKey": request.sort_key.unwrap_or(SortKey::Relevance),
            "reverse": request.reverse,
        });
        merge_page_args(&mut variables, &request.page);

        let context = format!("search listing for \"{}\"", request.term);
        let data = self.execute(&document, variables, &context).await?;
        let decoded: SearchListingData = decode(data, &context)?;

        Ok(ListingPage {
            facet_groups: decoded.search.product_filters,
            nodes: decoded.search.nodes,
            page_info: decoded.search.page_info,
        })
    }

    /// Fetches one page of the product-count walk.
    ///
    /// # Errors
    ///
    /// [`QueryError::CollectionNotFound`] when the collection is missing,
    /// plus the transport taxonomy of [`Self::collection_listing`].
    pub async fn collection_count_page(
        &self,
        handle: &str,
        cursor: Option<&str>,
    ) -> Result<CountPage, QueryError> {
        let variables = json!({
            "handle": handle,
            "cursor": cursor,
            "pageSize": COUNT_PAGE_SIZE,
        });

        let context = format!("product count for {handle}");
        let data = self.execute(COLLECTION_COUNT_QUERY, variables, &context).await?;
        let decoded: CountData = decode(data, &context)?;
        let collection = decoded
            .collection
            .ok_or_else(|| QueryError::CollectionNotFound {
                handle: handle.to_owned(),
            })?;

        Ok(CountPage {
            edge_count: collection.products.edges.len() as u64,
            has_next_page: collection.products.page_info.has_next_page,
            end_cursor: collection.products.page_info.end_cursor,
        })
    }

    /// Exact product count for an unfiltered collection: walks every page
    /// and sums edge counts.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::collection_count_page`], plus
    /// [`QueryError::PaginationLimit`] on a cycling cursor chain.
    pub async fn collection_product_count(&self, handle: &str) -> Result<u64, QueryError> {
        count_all_pages(handle, |cursor| async move {
            self.collection_count_page(handle, cursor.as_deref()).await
        })
        .await
    }

    /// Posts one GraphQL request, with retry on transient failures, and
    /// returns the envelope's `data` value.
    async fn execute(
        &self,
        document: &str,
        variables: serde_json::Value,
        context: &str,
    ) -> Result<serde_json::Value, QueryError> {
        let body = json!({ "query": document, "variables": variables });

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let body = body.clone();
            async move {
                let response = self
                    .client
                    .post(&self.endpoint)
                    .header("X-Shopify-Storefront-Access-Token", &self.access_token)
                    .json(&body)
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(QueryError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(QueryError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: self.endpoint.clone(),
                    });
                }

                let text = response.text().await?;
                let envelope: GraphQlEnvelope =
                    serde_json::from_str(&text).map_err(|e| QueryError::Deserialize {
                        context: context.to_owned(),
                        source: e,
                    })?;

                if let Some(errors) = envelope.errors {
                    if !errors.is_empty() {
                        return Err(QueryError::Api {
                            context: context.to_owned(),
                            message: errors
                                .into_iter()
                                .map(|e| e.message)
                                .collect::<Vec<_>>()
                                .join("; "),
                        });
                    }
                }

                envelope.data.ok_or_else(|| QueryError::Api {
                    context: context.to_owned(),
                    message: "response carried no data".to_owned(),
                })
            }
        })
        .await
    }
}

fn decode<T: DeserializeOwned>(data: serde_json::Value, context: &str) -> Result<T, QueryError> {
    serde_json::from_value(data).map_err(|e| QueryError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

fn merge_page_args(variables: &mut serde_json::Value, page: &PageArgs) {
    let Ok(serde_json::Value::Object(page_map)) = serde_json::to_value(page) else {
        return;
    };
    if let serde_json::Value::Object(map) = variables {
        map.extend(page_map);
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
