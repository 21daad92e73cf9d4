use super::test_helpers::{
    InMemorySource, create_test_browser, create_test_browser_with_page_size, record,
};
use super::*;
use crate::error::{BulkError, Error, FetchError};
use crate::types::ArtworkId;
use std::time::Duration;


/// Ids of a selection, as plain integers
fn ids(selection: &SelectionSet) -> Vec<u64> {
    selection.ids().into_iter().map(|id| id.get()).collect()
}

/// Drain every event currently buffered in `rx`
fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_new_browser_starts_on_page_one_with_empty_selection() {
    let (browser, source) = create_test_browser(InMemorySource::with_ids(1..=30));

    let view = browser.view().await;
    assert_eq!(view.current_page, 1);
    assert_eq!(view.page_size, 12);
    assert_eq!(view.total_records, 0);
    assert!(view.records.is_empty());
    assert!(view.selection.is_empty());
    assert!(view.last_error.is_none());
    assert_eq!(source.fetch_count(), 0, "construction must not fetch");
}

#[tokio::test]
async fn test_with_source_rejects_invalid_config() {
    let mut config = Config::default();
    config.source.page_size = 0;

    let result = ArtworkBrowser::with_source(config, Arc::new(InMemorySource::default()));
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[tokio::test]
async fn test_clones_share_state() {
    let (browser, _source) = create_test_browser(InMemorySource::with_ids(1..=30));
    let other = browser.clone();

    browser.set_page(2).await.unwrap();

    assert_eq!(other.current_page().await, 2);
    assert_eq!(other.view().await.records.len(), 12);
}
