//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`view`] - Render inputs for the table
//! - [`page`] - Page changes
//! - [`selection`] - Manual and bulk selection
//! - [`system`] - Health, events, OpenAPI

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

mod page;
mod selection;
mod system;
mod view;

// Re-export all handlers so `routes::function_name` continues to work
pub use page::*;
pub use selection::*;
pub use system::*;
pub use view::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Request body for PUT /page
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SetPageRequest {
    /// 1-based page number to display
    pub page: u32,
}

/// Request body for POST /selection/bulk
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BulkSelectRequest {
    /// Number of records to select, starting at the current page
    pub count: usize,
}

/// Response for POST /selection/bulk
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BulkSelectResponse {
    /// Requested number of records
    pub requested: usize,
    /// Number of records actually selected
    pub selected: usize,
    /// The new selection
    pub selection: crate::types::SelectionSet,
}

/// Response for DELETE /selection/bulk
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CancelBulkSelectResponse {
    /// Whether a running bulk selection was signalled
    pub cancelled: bool,
}

/// Map a JSON body rejection onto the API error format
pub(crate) fn rejection_to_api_error(rejection: JsonRejection) -> ApiError {
    ApiError::validation(rejection.body_text())
}
