//! Manual selection replacement and cross-page bulk selection.

use super::ArtworkBrowser;
use crate::error::{BulkError, Error, Result};
use crate::source::ArtworkSource;
use crate::types::{ArtworkId, ArtworkRecord, Event, SelectionSet};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Records gathered by [`collect_first_n`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Collected records: ascending page order, source order within a page
    pub records: Vec<ArtworkRecord>,
    /// Number of fetches issued
    pub pages_fetched: u32,
}

/// Collect the first `count` records starting at `start_page`
///
/// Pages are fetched one after another, each awaited before the next is
/// requested. From every page the leading records are taken until `count` is
/// reached; an id already collected is skipped. The walk stops when:
/// - `count` records have been collected, or
/// - the number collected reaches `known_total`, or
/// - a page comes back empty.
///
/// A `known_total` of 0 means no total has been recorded yet; the total
/// reported by the first fetched page is used instead. `count == 0` returns
/// immediately without fetching.
///
/// # Errors
///
/// [`BulkError::Cancelled`] if `cancel` fires before the walk finishes, or
/// [`BulkError::Fetch`] for the first page whose fetch fails. No partial
/// result is returned in either case.
pub async fn collect_first_n(
    source: &dyn ArtworkSource,
    start_page: u32,
    page_size: u32,
    count: usize,
    known_total: u64,
    cancel: &CancellationToken,
) -> std::result::Result<BulkOutcome, BulkError> {
    let mut records: Vec<ArtworkRecord> = Vec::new();
    let mut seen: HashSet<ArtworkId> = HashSet::new();
    let mut remaining = count;
    let mut page = start_page.max(1);
    let mut total_guard = known_total;
    let mut pages_fetched = 0u32;

    while remaining > 0 {
        if cancel.is_cancelled() {
            return Err(BulkError::Cancelled);
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(BulkError::Cancelled),
            result = source.fetch_page(page, page_size) => {
                result.map_err(|source| BulkError::Fetch { page, source })?
            }
        };
        pages_fetched += 1;

        if total_guard == 0 {
            total_guard = fetched.total_records;
        }

        if fetched.records.is_empty() {
            debug!(page, "Source returned an empty page, stopping bulk walk");
            break;
        }

        let mut taken = 0usize;
        for record in fetched.records {
            if taken == remaining {
                break;
            }
            if seen.insert(record.id) {
                records.push(record);
                taken += 1;
            }
        }
        remaining -= taken;

        debug!(page, taken, remaining, "Bulk walk consumed page");

        if records.len() as u64 >= total_guard {
            break;
        }

        page = match page.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(BulkOutcome {
        records,
        pages_fetched,
    })
}

impl ArtworkBrowser {
    /// Replace the selection with `records`
    ///
    /// Used for manual header/row selection. Later records repeating an id
    /// are dropped. Emits [`Event::SelectionChanged`].
    pub async fn toggle_selection(&self, records: Vec<ArtworkRecord>) -> SelectionSet {
        let selection = SelectionSet::from_records(records);
        self.replace_selection(selection.clone()).await;
        selection
    }

    /// Select the first `count` records starting at the current page
    ///
    /// See [`collect_first_n`] for how pages are walked. The result replaces
    /// the selection as a whole. `count == 0` clears the selection without
    /// fetching.
    ///
    /// # Errors
    ///
    /// - [`Error::Fetch`] if a page fetch fails; the selection is unchanged
    /// - [`Error::Cancelled`] if [`cancel_bulk_select`](Self::cancel_bulk_select)
    ///   is called while it runs; the selection is unchanged
    pub async fn bulk_select(&self, count: usize) -> Result<SelectionSet> {
        self.bulk_select_with_cancel(count, CancellationToken::new())
            .await
    }

    /// [`bulk_select`](Self::bulk_select) that also stops when `cancel` fires
    ///
    /// # Errors
    ///
    /// Same as [`bulk_select`](Self::bulk_select).
    pub async fn bulk_select_with_cancel(
        &self,
        count: usize,
        cancel: CancellationToken,
    ) -> Result<SelectionSet> {
        let _fetch_guard = self.fetch_lock.lock().await;

        if count == 0 {
            let selection = SelectionSet::new();
            self.replace_selection(selection.clone()).await;
            return Ok(selection);
        }

        let (start_page, known_total) = {
            let state = self.state.read().await;
            (state.page.current_page, state.page.total_records)
        };

        let _active = ActiveBulk::register(&self.active_bulk, &cancel);
        self.emit_event(Event::BulkSelectStarted {
            requested: count,
            from_page: start_page,
        });

        let outcome = collect_first_n(
            self.source.as_ref(),
            start_page,
            self.config.page_size(),
            count,
            known_total,
            &cancel,
        )
        .await;

        match outcome {
            Ok(outcome) => {
                let selection = SelectionSet::from_records(outcome.records);
                {
                    let mut state = self.state.write().await;
                    state.selection = selection.clone();
                    state.page.last_error = None;
                }

                info!(
                    requested = count,
                    selected = selection.len(),
                    pages_fetched = outcome.pages_fetched,
                    "Bulk selection complete"
                );
                self.emit_event(Event::BulkSelectCompleted {
                    requested: count,
                    selected: selection.len(),
                    pages_fetched: outcome.pages_fetched,
                });
                self.emit_event(Event::SelectionChanged {
                    count: selection.len(),
                });
                Ok(selection)
            }
            Err(BulkError::Cancelled) => {
                warn!(requested = count, "Bulk selection cancelled");
                self.emit_event(Event::BulkSelectCancelled { requested: count });
                Err(Error::Cancelled)
            }
            Err(BulkError::Fetch { page, source }) => {
                error!(requested = count, page, error = %source, "Bulk selection failed");
                self.state.write().await.page.last_error = Some(source.to_string());
                self.emit_event(Event::BulkSelectFailed {
                    requested: count,
                    page,
                    error: source.to_string(),
                });
                Err(Error::Fetch(source))
            }
        }
    }

    /// Cancel the bulk selection currently running, if any
    ///
    /// Returns `true` if a running bulk selection was signalled.
    pub async fn cancel_bulk_select(&self) -> bool {
        match lock_slot(&self.active_bulk).as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    async fn replace_selection(&self, selection: SelectionSet) {
        let count = selection.len();
        self.state.write().await.selection = selection;
        self.emit_event(Event::SelectionChanged { count });
    }
}

/// Publishes the running walk's token and clears it again when dropped
///
/// The walk future can be dropped mid-fetch (client disconnect, aborted
/// task), so clearing cannot wait for the walk to return.
struct ActiveBulk<'a> {
    slot: &'a Arc<Mutex<Option<CancellationToken>>>,
}

impl<'a> ActiveBulk<'a> {
    fn register(
        slot: &'a Arc<Mutex<Option<CancellationToken>>>,
        token: &CancellationToken,
    ) -> Self {
        *lock_slot(slot) = Some(token.clone());
        Self { slot }
    }
}

impl Drop for ActiveBulk<'_> {
    fn drop(&mut self) {
        *lock_slot(self.slot) = None;
    }
}

// A panic while holding the slot leaves a plain Option behind; keep using it
fn lock_slot(slot: &Mutex<Option<CancellationToken>>) -> MutexGuard<'_, Option<CancellationToken>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
