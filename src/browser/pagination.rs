//! Page loading and upstream totals.

use super::ArtworkBrowser;
use crate::error::{Error, Result};
use crate::types::Event;
use tracing::{debug, error};

impl ArtworkBrowser {
    /// Make `page` the current page and load its records
    ///
    /// Issues exactly one fetch. On success the current page, its records and
    /// the upstream total are replaced and [`Event::PageLoaded`] is emitted.
    /// A page past the end is served as whatever the source returns for it
    /// (usually no records).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPage`] if `page` is 0 (no fetch is made)
    /// - [`Error::Fetch`] if the fetch fails; page, records, total and
    ///   selection are left as they were and the failure is recorded in
    ///   [`PageState::last_error`](crate::types::PageState::last_error)
    pub async fn set_page(&self, page: u32) -> Result<()> {
        if page == 0 {
            return Err(Error::InvalidPage(page));
        }

        let _fetch_guard = self.fetch_lock.lock().await;
        self.load_page_locked(page).await
    }

    /// Reload the current page
    ///
    /// # Errors
    ///
    /// Same as [`set_page`](Self::set_page).
    pub async fn refresh(&self) -> Result<()> {
        let _fetch_guard = self.fetch_lock.lock().await;
        let page = self.state.read().await.page.current_page;
        self.load_page_locked(page).await
    }

    /// Store the total record count reported by the source
    pub async fn record_total(&self, total: u64) {
        self.state.write().await.page.record_total(total);
    }

    /// The 1-based page currently displayed
    pub async fn current_page(&self) -> u32 {
        self.state.read().await.page.current_page
    }

    // Caller must hold the fetch lock
    async fn load_page_locked(&self, page: u32) -> Result<()> {
        let page_size = self.config.page_size();

        match self.source.fetch_page(page, page_size).await {
            Ok(fetched) => {
                let record_count = fetched.records.len();
                let total_records = fetched.total_records;
                {
                    let mut state = self.state.write().await;
                    state.page.current_page = page;
                    state.page.record_total(total_records);
                    state.page.last_error = None;
                    state.records = fetched.records;
                }

                debug!(page, record_count, total_records, "Loaded artwork page");
                self.emit_event(Event::PageLoaded {
                    page,
                    record_count,
                    total_records,
                });
                Ok(())
            }
            Err(e) => {
                error!(page, error = %e, "Failed to load artwork page");
                self.state.write().await.page.last_error = Some(e.to_string());
                self.emit_event(Event::PageLoadFailed {
                    page,
                    error: e.to_string(),
                });
                Err(e.into())
            }
        }
    }
}
