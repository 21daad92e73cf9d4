//! Common test utilities for artwork-browser integration tests

use artwork_browser::{ArtworkBrowser, Config};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Listing payload in the museum API's shape for `ids`, reporting `total`
pub fn listing(ids: impl IntoIterator<Item = u64>, total: u64) -> serde_json::Value {
    let data: Vec<serde_json::Value> = ids
        .into_iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Artwork {}", id),
                "place_of_origin": "France",
                "artist_display": null,
                "inscriptions": null,
                "date_start": 1880,
                "date_end": 1890
            })
        })
        .collect();

    json!({
        "pagination": { "total": total },
        "data": data
    })
}

/// Mount a listing page that must be requested exactly `times` times
pub async fn mount_page(
    server: &MockServer,
    page: u32,
    limit: u32,
    ids: impl IntoIterator<Item = u64>,
    total: u64,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path("/api/v1/artworks"))
        .and(query_param("page", page.to_string()))
        .and(query_param("limit", limit.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(ids, total)))
        .expect(times)
        .mount(server)
        .await;
}

/// Browser talking to `server` with the given page size
pub fn browser_for(server: &MockServer, page_size: u32) -> ArtworkBrowser {
    let mut config = Config::default();
    config.source.base_url = format!("{}/api/v1", server.uri());
    config.source.page_size = page_size;
    ArtworkBrowser::new(config).expect("config should be valid")
}
