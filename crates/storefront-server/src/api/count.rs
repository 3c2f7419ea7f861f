use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_query_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ProductCount {
    total: u64,
}

/// Exact product count for an unfiltered collection.
///
/// Walks the collection's full product set page by page on the storefront
/// API; a missing collection comes back as a 404, never as `{"total": 0}`.
/// Filtered contexts don't call this route — their displayed total is the
/// loaded page length, computed client-side.
pub(super) async fn collection_product_count(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<ProductCount>>, ApiError> {
    let total = state
        .client
        .collection_product_count(&handle)
        .await
        .map_err(|e| map_query_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ProductCount { total },
        meta: ResponseMeta::new(req_id.0),
    }))
}
