//! The artwork browser: page state, selection and their operations.
//!
//! The `ArtworkBrowser` struct and its methods are organized by concern:
//! - [`pagination`] - Page loading and upstream totals
//! - [`selection`] - Manual selection replacement and cross-page bulk selection

mod pagination;
mod selection;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use selection::{BulkOutcome, collect_first_n};

use crate::config::Config;
use crate::error::Result;
use crate::source::{ArticClient, ArtworkSource};
use crate::types::{ArtworkRecord, BrowserView, Event, PageState, SelectionSet};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// State owned by one browser instance
#[derive(Debug)]
pub(crate) struct BrowserState {
    /// Current page, page size, upstream total and last fetch error
    pub(crate) page: PageState,
    /// Records of the current page in source order
    pub(crate) records: Vec<ArtworkRecord>,
    /// Current selection
    pub(crate) selection: SelectionSet,
}

impl BrowserState {
    fn new(page_size: u32) -> Self {
        Self {
            page: PageState::new(page_size),
            records: Vec::new(),
            selection: SelectionSet::new(),
        }
    }
}

/// Browser instance (cloneable - all fields are Arc-wrapped)
///
/// Page loads and bulk selections run one at a time per instance: each holds
/// the fetch lock for its whole fetch sequence. Reads through [`view`] only
/// take the state lock and never wait on the network.
///
/// [`view`]: ArtworkBrowser::view
#[derive(Clone)]
pub struct ArtworkBrowser {
    /// Where pages come from
    pub(crate) source: Arc<dyn ArtworkSource>,
    /// Configuration
    pub(crate) config: Arc<Config>,
    /// Page state, current records and selection
    pub(crate) state: Arc<tokio::sync::RwLock<BrowserState>>,
    /// Serializes fetch sequences (page loads and bulk selections)
    pub(crate) fetch_lock: Arc<tokio::sync::Mutex<()>>,
    /// Cancellation token of the bulk selection currently running, if any
    ///
    /// Never held across an await; cleared on drop by the running walk.
    pub(crate) active_bulk: Arc<std::sync::Mutex<Option<CancellationToken>>>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl ArtworkBrowser {
    /// Create a browser backed by the museum listing endpoint
    ///
    /// No request is made until the first page load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration is
    /// invalid, or an error if the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use artwork_browser::{ArtworkBrowser, Config};
    ///
    /// # async fn example() -> artwork_browser::Result<()> {
    /// let browser = ArtworkBrowser::new(Config::default())?;
    /// browser.set_page(1).await?;
    /// let selection = browser.bulk_select(15).await?;
    /// assert!(selection.len() <= 15);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = ArticClient::new(&config.source)?;
        Self::with_source(config, Arc::new(client))
    }

    /// Create a browser driven by any [`ArtworkSource`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration is invalid.
    pub fn with_source(config: Config, source: Arc<dyn ArtworkSource>) -> Result<Self> {
        config.validate()?;
        let (event_tx, _rx) = tokio::sync::broadcast::channel(1000);
        let state = BrowserState::new(config.page_size());

        Ok(Self {
            source,
            config: Arc::new(config),
            state: Arc::new(tokio::sync::RwLock::new(state)),
            fetch_lock: Arc::new(tokio::sync::Mutex::new(())),
            active_bulk: Arc::new(std::sync::Mutex::new(None)),
            event_tx,
        })
    }

    /// Subscribe to browser events
    ///
    /// Each subscriber receives every event emitted after it subscribed.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Current configuration
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Render inputs for the presentation surface
    pub async fn view(&self) -> BrowserView {
        let state = self.state.read().await;
        BrowserView {
            records: state.records.clone(),
            total_records: state.page.total_records,
            current_page: state.page.current_page,
            page_size: state.page.page_size,
            selection: state.selection.clone(),
            last_error: state.page.last_error.clone(),
        }
    }

    /// Snapshot of the pagination state
    pub async fn page_state(&self) -> PageState {
        self.state.read().await.page.clone()
    }

    /// Snapshot of the current selection
    pub async fn selection(&self) -> SelectionSet {
        self.state.read().await.selection.clone()
    }

    /// Send an event to all subscribers; dropped if nobody is listening
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Spawn the REST API server in a background task
    ///
    /// The server listens on the configured bind address
    /// (default: 127.0.0.1:6790) until the task is aborted.
    pub fn spawn_api_server(&self) -> tokio::task::JoinHandle<Result<()>> {
        let browser = self.clone();
        let config = self.config.clone();

        tokio::spawn(async move { crate::api::start_api_server(browser, config).await })
    }
}
