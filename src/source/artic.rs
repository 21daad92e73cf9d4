//! HTTP client for the museum listing endpoint.

use super::{ArtworkSource, FetchedPage};
use crate::config::SourceConfig;
use crate::error::{Error, FetchError, Result};
use crate::types::{ArtworkId, ArtworkRecord};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Client for `GET {base_url}/artworks?page=<n>&limit=<m>`
#[derive(Clone, Debug)]
pub struct ArticClient {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl ArticClient {
    /// Create a client from the source settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL does not parse and
    /// [`Error::Other`] if the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let endpoint = format!("{}/artworks", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint).map_err(|e| Error::Config {
            message: format!("base_url is not a valid URL: {}", e),
            key: Some("base_url".to_string()),
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    /// The listing URL requests are sent to (without query)
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn page_url(&self, page: u32, limit: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }
}

#[async_trait]
impl ArtworkSource for ArticClient {
    async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
    ) -> std::result::Result<FetchedPage, FetchError> {
        if page == 0 || limit == 0 {
            return Err(FetchError::InvalidRequest { page, limit });
        }

        let url = self.page_url(page, limit);
        debug!(page, limit, url = %url, "Fetching artwork page");

        let response = self.http_client.get(url.clone()).send().await?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let page_data = parse_listing(&body)?;

        debug!(
            page,
            records = page_data.records.len(),
            total = page_data.total_records,
            "Fetched artwork page"
        );
        Ok(page_data)
    }
}

/// Project a listing envelope into a [`FetchedPage`]
pub(crate) fn parse_listing(body: &str) -> std::result::Result<FetchedPage, FetchError> {
    let envelope: ListingEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    Ok(FetchedPage {
        records: envelope.data.into_iter().map(ArtworkRecord::from).collect(),
        total_records: envelope.pagination.total,
    })
}

#[derive(Deserialize)]
struct ListingEnvelope {
    data: Vec<RawArtwork>,
    pagination: Pagination,
}

#[derive(Deserialize)]
struct Pagination {
    total: u64,
}

#[derive(Deserialize)]
struct RawArtwork {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    place_of_origin: Option<String>,
    #[serde(default)]
    artist_display: Option<String>,
    #[serde(default)]
    inscriptions: Option<String>,
    #[serde(default)]
    date_start: Option<TextOrNumber>,
    #[serde(default)]
    date_end: Option<TextOrNumber>,
}

/// Upstream dates are integers; older payloads carried strings
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Integer(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
            TextOrNumber::Text(s) => s,
        }
    }
}

impl From<RawArtwork> for ArtworkRecord {
    fn from(raw: RawArtwork) -> Self {
        ArtworkRecord {
            id: ArtworkId(raw.id),
            title: raw.title,
            place_of_origin: raw.place_of_origin,
            artist_display: raw.artist_display,
            inscriptions: raw.inscriptions,
            date_start: raw.date_start.map(String::from),
            date_end: raw.date_end.map(String::from),
        }
    }
}
