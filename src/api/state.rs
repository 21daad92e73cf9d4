//! Application state for the API server

use crate::{ArtworkBrowser, Config};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request; both fields are cheap Arc clones.
#[derive(Clone)]
pub struct AppState {
    /// The browser instance the surface drives
    pub browser: ArtworkBrowser,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(browser: ArtworkBrowser, config: Arc<Config>) -> Self {
        Self { browser, config }
    }
}
