//! Page change handlers.

use super::{SetPageRequest, rejection_to_api_error};
use crate::api::AppState;
use crate::types::BrowserView;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};

/// PUT /page - Change the current page
#[utoipa::path(
    put,
    path = "/page",
    tag = "page",
    request_body = SetPageRequest,
    responses(
        (status = 200, description = "Page loaded", body = BrowserView),
        (status = 400, description = "Invalid page number or body", body = crate::error::ApiError),
        (status = 502, description = "Listing endpoint failed; previous page kept", body = crate::error::ApiError)
    )
)]
pub async fn set_page(
    State(state): State<AppState>,
    body: Result<Json<SetPageRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_to_api_error(rejection).into_response(),
    };

    match state.browser.set_page(request.page).await {
        Ok(()) => Json(state.browser.view().await).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /page/refresh - Reload the current page
#[utoipa::path(
    post,
    path = "/page/refresh",
    tag = "page",
    responses(
        (status = 200, description = "Page reloaded", body = BrowserView),
        (status = 502, description = "Listing endpoint failed; previous records kept", body = crate::error::ApiError)
    )
)]
pub async fn refresh_page(State(state): State<AppState>) -> Response {
    match state.browser.refresh().await {
        Ok(()) => Json(state.browser.view().await).into_response(),
        Err(e) => e.into_response(),
    }
}
