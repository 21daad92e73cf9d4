//! Render inputs for the table.

use crate::api::AppState;
use axum::{Json, extract::State};

/// GET /view - Records of the current page, totals, and selection
#[utoipa::path(
    get,
    path = "/view",
    tag = "view",
    responses(
        (status = 200, description = "Render inputs for the table", body = crate::types::BrowserView)
    )
)]
pub async fn get_view(State(state): State<AppState>) -> Json<crate::types::BrowserView> {
    Json(state.browser.view().await)
}
