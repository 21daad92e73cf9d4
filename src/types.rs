//! Core types for artwork-browser

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

/// Unique identifier of an artwork record
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ArtworkId(pub u64);

impl ArtworkId {
    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ArtworkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl PartialEq<u64> for ArtworkId {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized projection of one artwork from the listing API
///
/// Every text field is optional: absent or `null` upstream stays `None`.
/// Records are never mutated after they are fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArtworkRecord {
    /// Upstream identifier
    pub id: ArtworkId,
    /// Artwork title
    #[serde(default)]
    pub title: Option<String>,
    /// Where the work was made
    #[serde(default)]
    pub place_of_origin: Option<String>,
    /// Artist name and biographical line as displayed by the museum
    #[serde(default)]
    pub artist_display: Option<String>,
    /// Inscriptions on the work
    #[serde(default)]
    pub inscriptions: Option<String>,
    /// Start of the creation date range
    #[serde(default)]
    pub date_start: Option<String>,
    /// End of the creation date range
    #[serde(default)]
    pub date_end: Option<String>,
}

impl ArtworkRecord {
    /// Record with only an id, every text field empty
    pub fn with_id(id: impl Into<ArtworkId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }
}

/// Pagination state of a browser instance
///
/// `total_records` is always the value most recently reported by the source,
/// never a locally computed count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageState {
    /// 1-based page currently displayed
    pub current_page: u32,
    /// Records per page (fixed for the lifetime of the browser)
    pub page_size: u32,
    /// Total record count reported by the last successful page load
    pub total_records: u64,
    /// Message of the most recent failed fetch, cleared by the next successful one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl PageState {
    /// Fresh state: page 1, nothing loaded yet
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_records: 0,
            last_error: None,
        }
    }

    /// Store the upstream-reported total
    pub fn record_total(&mut self, total: u64) {
        self.total_records = total;
    }

    /// Number of pages the reported total spans (at least 1)
    pub fn page_count(&self) -> u64 {
        if self.total_records == 0 || self.page_size == 0 {
            return 1;
        }
        self.total_records.div_ceil(u64::from(self.page_size))
    }
}

/// Ordered set of selected records, unique by id
///
/// A selection is always replaced as a whole; building one from a sequence
/// keeps the first occurrence of each id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Vec<ArtworkRecord>", into = "Vec<ArtworkRecord>")]
pub struct SelectionSet(Vec<ArtworkRecord>);

impl SelectionSet {
    /// Empty selection
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a selection, dropping later records that repeat an id
    pub fn from_records(records: impl IntoIterator<Item = ArtworkRecord>) -> Self {
        let mut seen = HashSet::new();
        Self(
            records
                .into_iter()
                .filter(|record| seen.insert(record.id))
                .collect(),
        )
    }

    /// Selected records in selection order
    pub fn records(&self) -> &[ArtworkRecord] {
        &self.0
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> Vec<ArtworkId> {
        self.0.iter().map(|record| record.id).collect()
    }

    /// Whether a record with this id is selected
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.0.iter().any(|record| record.id == id)
    }

    /// Number of selected records
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the selection, returning its records
    pub fn into_records(self) -> Vec<ArtworkRecord> {
        self.0
    }
}

impl From<Vec<ArtworkRecord>> for SelectionSet {
    fn from(records: Vec<ArtworkRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<SelectionSet> for Vec<ArtworkRecord> {
    fn from(selection: SelectionSet) -> Self {
        selection.0
    }
}

/// Everything a presentation surface needs to render the table
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BrowserView {
    /// Records of the current page, in source order
    pub records: Vec<ArtworkRecord>,
    /// Upstream-reported total
    pub total_records: u64,
    /// 1-based current page
    pub current_page: u32,
    /// Records per page
    pub page_size: u32,
    /// Current selection
    pub selection: SelectionSet,
    /// Most recent fetch failure, if the last fetch failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Event emitted by a browser instance
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A page was fetched and is now current
    PageLoaded {
        /// Page number
        page: u32,
        /// Records on the page
        record_count: usize,
        /// Upstream-reported total
        total_records: u64,
    },

    /// A page load failed; prior state is kept
    PageLoadFailed {
        /// Page number that was requested
        page: u32,
        /// Error message
        error: String,
    },

    /// The selection was replaced
    SelectionChanged {
        /// Number of selected records
        count: usize,
    },

    /// A bulk selection began
    BulkSelectStarted {
        /// Requested number of records
        requested: usize,
        /// Page the walk starts from
        from_page: u32,
    },

    /// A bulk selection finished and replaced the selection
    BulkSelectCompleted {
        /// Requested number of records
        requested: usize,
        /// Number of records actually selected
        selected: usize,
        /// Number of page fetches issued
        pages_fetched: u32,
    },

    /// A page fetch failed during a bulk selection; the selection is unchanged
    BulkSelectFailed {
        /// Requested number of records
        requested: usize,
        /// Page whose fetch failed
        page: u32,
        /// Error message
        error: String,
    },

    /// A bulk selection was cancelled; the selection is unchanged
    BulkSelectCancelled {
        /// Requested number of records
        requested: usize,
    },
}

impl Event {
    /// Stable snake_case name of the event variant
    pub fn kind(&self) -> &'static str {
        match self {
            Event::PageLoaded { .. } => "page_loaded",
            Event::PageLoadFailed { .. } => "page_load_failed",
            Event::SelectionChanged { .. } => "selection_changed",
            Event::BulkSelectStarted { .. } => "bulk_select_started",
            Event::BulkSelectCompleted { .. } => "bulk_select_completed",
            Event::BulkSelectFailed { .. } => "bulk_select_failed",
            Event::BulkSelectCancelled { .. } => "bulk_select_cancelled",
        }
    }
}
