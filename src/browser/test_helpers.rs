//! Shared test helpers for driving ArtworkBrowser instances without a network.

use crate::browser::ArtworkBrowser;
use crate::config::Config;
use crate::error::FetchError;
use crate::source::{ArtworkSource, FetchedPage};
use crate::types::ArtworkRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory paginated source that records every fetch it serves
#[derive(Default)]
pub(crate) struct InMemorySource {
    records: Vec<ArtworkRecord>,
    reported_total: Option<u64>,
    page_overrides: HashMap<u32, Vec<ArtworkRecord>>,
    failing_pages: Mutex<Vec<u32>>,
    delay: Option<Duration>,
    fetch_log: Mutex<Vec<(u32, u32)>>,
}

impl InMemorySource {
    /// Source holding one titled record per id, in order
    pub(crate) fn with_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            records: ids.into_iter().map(record).collect(),
            ..Default::default()
        }
    }

    /// Report `total` instead of the real record count
    pub(crate) fn reporting_total(mut self, total: u64) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Serve `records` for `page` regardless of the backing list
    pub(crate) fn with_page(mut self, page: u32, records: Vec<ArtworkRecord>) -> Self {
        self.page_overrides.insert(page, records);
        self
    }

    /// Fail every fetch of `page` with an HTTP 500
    pub(crate) fn failing_on(self, page: u32) -> Self {
        self.failing_pages.lock().unwrap().push(page);
        self
    }

    /// Sleep before answering each fetch
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Stop failing `page`
    pub(crate) fn heal(&self, page: u32) {
        self.failing_pages.lock().unwrap().retain(|p| *p != page);
    }

    /// Pages fetched so far, in request order
    pub(crate) fn fetched_pages(&self) -> Vec<u32> {
        self.fetch_log
            .lock()
            .unwrap()
            .iter()
            .map(|(page, _)| *page)
            .collect()
    }

    /// Number of fetches served so far
    pub(crate) fn fetch_count(&self) -> usize {
        self.fetch_log.lock().unwrap().len()
    }
}

#[async_trait]
impl ArtworkSource for InMemorySource {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<FetchedPage, FetchError> {
        if page == 0 || limit == 0 {
            return Err(FetchError::InvalidRequest { page, limit });
        }
        self.fetch_log.lock().unwrap().push((page, limit));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_pages.lock().unwrap().contains(&page) {
            return Err(FetchError::Status {
                status: 500,
                url: format!("memory://artworks?page={}&limit={}", page, limit),
            });
        }

        let total_records = self
            .reported_total
            .unwrap_or(self.records.len() as u64);

        let records = match self.page_overrides.get(&page) {
            Some(records) => records.clone(),
            None => {
                let start = (page as usize - 1).saturating_mul(limit as usize);
                let end = start.saturating_add(limit as usize).min(self.records.len());
                self.records
                    .get(start..end)
                    .map(<[ArtworkRecord]>::to_vec)
                    .unwrap_or_default()
            }
        };

        Ok(FetchedPage {
            records,
            total_records,
        })
    }
}

/// Titled record for `id`
pub(crate) fn record(id: u64) -> ArtworkRecord {
    ArtworkRecord {
        title: Some(format!("Artwork {}", id)),
        ..ArtworkRecord::with_id(id)
    }
}

/// Browser with the default page size (12) over `source`
pub(crate) fn create_test_browser(source: InMemorySource) -> (ArtworkBrowser, Arc<InMemorySource>) {
    create_test_browser_with_page_size(source, 12)
}

/// Browser with a custom page size over `source`
pub(crate) fn create_test_browser_with_page_size(
    source: InMemorySource,
    page_size: u32,
) -> (ArtworkBrowser, Arc<InMemorySource>) {
    let mut config = Config::default();
    config.source.page_size = page_size;

    let source = Arc::new(source);
    let browser = ArtworkBrowser::with_source(config, source.clone()).unwrap();
    (browser, source)
}
