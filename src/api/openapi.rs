//! OpenAPI documentation and schema generation
//!
//! Describes the artwork-browser REST API using utoipa for compile-time spec
//! generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the artwork-browser REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "artwork-browser REST API",
        version = "0.1.0",
        description = "Paginated artwork table with manual and cross-page bulk row selection",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:6790", description = "Local development server")
    ),
    paths(
        // View
        crate::api::routes::get_view,

        // Pagination
        crate::api::routes::set_page,
        crate::api::routes::refresh_page,

        // Selection
        crate::api::routes::get_selection,
        crate::api::routes::replace_selection,
        crate::api::routes::bulk_select,
        crate::api::routes::cancel_bulk_select,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::event_stream,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::ArtworkId,
        crate::types::ArtworkRecord,
        crate::types::PageState,
        crate::types::SelectionSet,
        crate::types::BrowserView,
        crate::types::Event,

        // API request/response types from routes
        crate::api::routes::SetPageRequest,
        crate::api::routes::BulkSelectRequest,
        crate::api::routes::BulkSelectResponse,
        crate::api::routes::CancelBulkSelectResponse,

        // Error types from error.rs
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "view", description = "Render inputs - Current records, total, page, and selection"),
        (name = "page", description = "Pagination - Change or reload the current page"),
        (name = "selection", description = "Selection - Manual selection and cross-page bulk selection"),
        (name = "system", description = "System endpoints - Health checks, OpenAPI spec, events"),
    )
)]
pub struct ApiDoc;
