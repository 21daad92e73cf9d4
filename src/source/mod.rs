//! Artwork sources: where pages of records come from
//!
//! The browser only talks to the [`ArtworkSource`] trait. [`ArticClient`]
//! implements it against the museum's public listing endpoint; tests and
//! embedders can supply their own implementation.

use crate::error::FetchError;
use crate::types::ArtworkRecord;
use async_trait::async_trait;

mod artic;

pub use artic::ArticClient;

/// One page as returned by a source
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Records in the order the source returned them
    pub records: Vec<ArtworkRecord>,
    /// Total record count reported alongside the page
    pub total_records: u64,
}

/// A paginated listing of artwork records
///
/// Implementations issue exactly one request per call and never retry.
///
/// # Example
///
/// ```no_run
/// use artwork_browser::source::{ArtworkSource, FetchedPage};
/// use artwork_browser::error::FetchError;
/// use async_trait::async_trait;
///
/// struct EmptySource;
///
/// #[async_trait]
/// impl ArtworkSource for EmptySource {
///     async fn fetch_page(&self, page: u32, limit: u32) -> Result<FetchedPage, FetchError> {
///         if page == 0 || limit == 0 {
///             return Err(FetchError::InvalidRequest { page, limit });
///         }
///         Ok(FetchedPage::default())
///     }
/// }
/// ```
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Fetch page `page` (1-based) holding up to `limit` records
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidRequest`] if `page` or `limit` is zero
    /// - [`FetchError::Network`], [`FetchError::Status`] or
    ///   [`FetchError::Malformed`] when the request or its payload fails
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<FetchedPage, FetchError>;
}
