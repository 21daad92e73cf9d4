//! Configuration types for artwork-browser

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

/// Main configuration for [`ArtworkBrowser`](crate::ArtworkBrowser)
///
/// Fields are grouped into sub-configs:
/// - [`source`](SourceConfig) - museum listing endpoint and page size
/// - [`api`](ApiConfig) - REST surface for a front end
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listing endpoint settings
    #[serde(default)]
    pub source: SourceConfig,

    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Number of records requested per page
    pub fn page_size(&self) -> u32 {
        self.source.page_size
    }

    /// Check the settings that would otherwise fail at first use
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key when the page size is
    /// zero or the base URL is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.source.page_size == 0 {
            return Err(Error::Config {
                message: "page_size must be at least 1".to_string(),
                key: Some("page_size".to_string()),
            });
        }

        let parsed = url::Url::parse(&self.source.base_url).map_err(|e| Error::Config {
            message: format!("base_url is not a valid URL: {}", e),
            key: Some("base_url".to_string()),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("base_url must use http or https, got {}", parsed.scheme()),
                key: Some("base_url".to_string()),
            });
        }

        if self.source.request_timeout.is_zero() {
            return Err(Error::Config {
                message: "request_timeout must be greater than zero".to_string(),
                key: Some("request_timeout".to_string()),
            });
        }

        Ok(())
    }
}

/// Museum listing endpoint configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// API root; `/artworks` is appended (default: "https://api.artic.edu/api/v1")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Records per page (default: 12)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:6790)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

fn default_base_url() -> String {
    "https://api.artic.edu/api/v1".to_string()
}

fn default_page_size() -> u32 {
    12
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("artwork-browser/{}", env!("CARGO_PKG_VERSION"))
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 6790))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}

// Durations are written as whole seconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_listing_endpoint() {
        let config = Config::default();

        assert_eq!(config.source.base_url, "https://api.artic.edu/api/v1");
        assert_eq!(config.page_size(), 12);
        assert_eq!(config.source.request_timeout, Duration::from_secs(30));
        assert!(config.source.user_agent.starts_with("artwork-browser/"));
        assert_eq!(config.api.bind_address.port(), 6790);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("deserialize failed");

        assert_eq!(config.page_size(), 12);
        assert!(config.api.cors_enabled);
        assert_eq!(config.api.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_timeout_serializes_as_seconds() {
        let mut config = Config::default();
        config.source.request_timeout = Duration::from_secs(5);

        let json = serde_json::to_value(&config).expect("serialize failed");
        assert_eq!(json["source"]["request_timeout"], 5);

        let back: Config = serde_json::from_value(json).expect("deserialize failed");
        assert_eq!(back.source.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.source.page_size = 0;

        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("page_size")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.source.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::Config { key: Some(ref k), .. }) if k == "base_url"
        ));

        config.source.base_url = "ftp://museum.example/api".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::Config { key: Some(ref k), .. }) if k == "base_url"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.source.request_timeout = Duration::ZERO;

        assert!(matches!(
            config.validate(),
            Err(Error::Config { key: Some(ref k), .. }) if k == "request_timeout"
        ));
    }
}
