//! # artwork-browser
//!
//! Paginated browser over a museum's public artwork listing, with manual row
//! selection and cross-page bulk selection.
//!
//! ## Overview
//!
//! - [`ArtworkSource`] fetches one page of records; [`ArticClient`] talks to
//!   the Art Institute of Chicago listing endpoint.
//! - [`ArtworkBrowser`] owns the page state and the selection. Changing the
//!   page fetches it; [`ArtworkBrowser::bulk_select`] walks forward from the
//!   current page until it has collected the requested number of records.
//! - Every state change is broadcast as an [`Event`].
//! - The [`api`] module exposes a browser over HTTP.
//!
//! ## Quick Start
//!
//! ```no_run
//! use artwork_browser::{ArtworkBrowser, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let browser = ArtworkBrowser::new(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = browser.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     browser.set_page(1).await?;
//!     let selection = browser.bulk_select(15).await?;
//!     println!("Selected {} artworks", selection.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Page state and selection controller
pub mod browser;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Listing data sources
pub mod source;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use browser::{ArtworkBrowser, BulkOutcome, collect_first_n};
pub use config::{ApiConfig, Config, SourceConfig};
pub use error::{ApiError, BulkError, Error, ErrorDetail, FetchError, Result, ToHttpStatus};
pub use source::{ArticClient, ArtworkSource, FetchedPage};
pub use types::{ArtworkId, ArtworkRecord, BrowserView, Event, PageState, SelectionSet};

/// Serve the REST API for `browser` until a termination signal arrives.
///
/// A bulk selection still running at that point is cancelled.
///
/// - **Unix:** listens for SIGTERM and SIGINT, falling back to whichever one
///   could be registered.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use artwork_browser::{ArtworkBrowser, Config, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let browser = ArtworkBrowser::new(Config::default())?;
///     run_with_shutdown(browser).await?;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(browser: ArtworkBrowser) -> Result<()> {
    let config = browser.config();
    api::serve_with_shutdown(browser, config, wait_for_signal()).await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Registration can fail in restricted environments (containers, tests)
    match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM signal"),
                _ = sigint.recv() => tracing::info!("Received SIGINT signal (Ctrl+C)"),
            }
        }
        (Err(e), Ok(mut sigint)) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            sigint.recv().await;
            tracing::info!("Received SIGINT signal (Ctrl+C)");
        }
        (Ok(mut sigterm), Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            sigterm.recv().await;
            tracing::info!("Received SIGTERM signal");
        }
        (Err(e), Err(_)) => {
            tracing::error!(error = %e, "Could not register any signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C signal"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C signal"),
    }
}
