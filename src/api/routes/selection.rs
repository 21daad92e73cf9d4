//! Manual and bulk selection handlers.

use super::{
    BulkSelectRequest, BulkSelectResponse, CancelBulkSelectResponse, rejection_to_api_error,
};
use crate::api::AppState;
use crate::types::{ArtworkRecord, SelectionSet};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};

/// GET /selection - Current selection
#[utoipa::path(
    get,
    path = "/selection",
    tag = "selection",
    responses(
        (status = 200, description = "Selected records in selection order", body = Vec<ArtworkRecord>)
    )
)]
pub async fn get_selection(State(state): State<AppState>) -> Json<SelectionSet> {
    Json(state.browser.selection().await)
}

/// PUT /selection - Replace the selection with the given records
#[utoipa::path(
    put,
    path = "/selection",
    tag = "selection",
    request_body = Vec<ArtworkRecord>,
    responses(
        (status = 200, description = "New selection (duplicates by id removed)", body = Vec<ArtworkRecord>),
        (status = 400, description = "Invalid body", body = crate::error::ApiError)
    )
)]
pub async fn replace_selection(
    State(state): State<AppState>,
    body: Result<Json<Vec<ArtworkRecord>>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(records)) => Json(state.browser.toggle_selection(records).await).into_response(),
        Err(rejection) => rejection_to_api_error(rejection).into_response(),
    }
}

/// POST /selection/bulk - Select the first N records from the current page on
#[utoipa::path(
    post,
    path = "/selection/bulk",
    tag = "selection",
    request_body = BulkSelectRequest,
    responses(
        (status = 200, description = "Selection replaced", body = BulkSelectResponse),
        (status = 400, description = "Invalid body", body = crate::error::ApiError),
        (status = 409, description = "Cancelled; selection unchanged", body = crate::error::ApiError),
        (status = 502, description = "A page fetch failed; selection unchanged", body = crate::error::ApiError)
    )
)]
pub async fn bulk_select(
    State(state): State<AppState>,
    body: Result<Json<BulkSelectRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_to_api_error(rejection).into_response(),
    };

    match state.browser.bulk_select(request.count).await {
        Ok(selection) => Json(BulkSelectResponse {
            requested: request.count,
            selected: selection.len(),
            selection,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(count = request.count, error = %e, "Bulk selection request failed");
            e.into_response()
        }
    }
}

/// DELETE /selection/bulk - Cancel a running bulk selection
#[utoipa::path(
    delete,
    path = "/selection/bulk",
    tag = "selection",
    responses(
        (status = 200, description = "Whether a running bulk selection was signalled", body = CancelBulkSelectResponse)
    )
)]
pub async fn cancel_bulk_select(State(state): State<AppState>) -> Json<CancelBulkSelectResponse> {
    let cancelled = state.browser.cancel_bulk_select().await;
    Json(CancelBulkSelectResponse { cancelled })
}
