//! REST API server module
//!
//! Exposes a browser instance to a front end: render inputs, page-change,
//! selection-change and bulk-selection requests, and a server-sent events
//! stream of browser events.

use crate::{ArtworkBrowser, Config, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## View
/// - `GET /view` - Render inputs (current records, total, page, selection)
///
/// ## Pagination
/// - `PUT /page` - Change the current page
/// - `POST /page/refresh` - Reload the current page
///
/// ## Selection
/// - `GET /selection` - Current selection
/// - `PUT /selection` - Replace the selection with the given records
/// - `POST /selection/bulk` - Select the first N records from the current page on
/// - `DELETE /selection/bulk` - Cancel a running bulk selection
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
/// - `GET /events` - Server-sent events stream
pub fn create_router(browser: ArtworkBrowser, config: Arc<Config>) -> Router {
    let state = AppState::new(browser, config.clone());

    let router = Router::new()
        // View
        .route("/view", get(routes::get_view))
        // Pagination
        .route("/page", put(routes::set_page))
        .route("/page/refresh", post(routes::refresh_page))
        // Selection
        .route("/selection", get(routes::get_selection))
        .route("/selection", put(routes::replace_selection))
        .route("/selection/bulk", post(routes::bulk_select))
        .route("/selection/bulk", delete(routes::cancel_bulk_select))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .route("/events", get(routes::event_stream));

    // Merge Swagger UI routes if enabled in config (before applying state)
    let router = if config.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.api.cors_enabled {
        let cors = build_cors_layer(&config.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// `"*"` or an empty list allows any origin.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Runs until the server fails; see [`serve_with_shutdown`] for a server that
/// stops on a signal.
///
/// # Example
///
/// ```no_run
/// use artwork_browser::{ArtworkBrowser, Config};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let browser = ArtworkBrowser::new((*config).clone())?;
///
/// // Start API server (blocks until shutdown)
/// artwork_browser::api::start_api_server(browser, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(browser: ArtworkBrowser, config: Arc<Config>) -> Result<()> {
    serve_with_shutdown(browser, config, std::future::pending()).await
}

/// Serve the API until `shutdown` completes
///
/// A bulk selection still running when `shutdown` fires is cancelled so the
/// server can drain.
pub async fn serve_with_shutdown<F>(
    browser: ArtworkBrowser,
    config: Arc<Config>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.api.bind_address;

    tracing::info!(
        address = %bind_address,
        "Starting API server"
    );

    let app = create_router(browser.clone(), config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %bind_address,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            if browser.cancel_bulk_select().await {
                tracing::info!("Cancelled running bulk selection for shutdown");
            }
        })
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
