//! Error types for artwork-browser
//!
//! This module provides error handling for the library, including:
//! - Fetch errors raised by artwork sources (network, HTTP status, payload shape)
//! - The crate-wide [`Error`] type returned by browser operations
//! - HTTP status code mapping and structured error bodies for the REST surface

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for artwork-browser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for artwork-browser
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "page_size")
        key: Option<String>,
    },

    /// A page fetch from the artwork source failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Page numbers are 1-based
    #[error("invalid page number: {0} (pages start at 1)")]
    InvalidPage(u32),

    /// A bulk selection was cancelled before it finished
    #[error("bulk selection cancelled")]
    Cancelled,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors raised while fetching one page from an artwork source
#[derive(Debug, Error)]
pub enum FetchError {
    /// Page number or page size was zero
    #[error("invalid request: page {page}, limit {limit}")]
    InvalidRequest {
        /// Requested page number
        page: u32,
        /// Requested page size
        limit: u32,
    },

    /// Transport-level failure (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The listing endpoint answered with a non-2xx status
    #[error("listing endpoint returned HTTP {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The requested URL
        url: String,
    },

    /// The response body did not match the listing envelope
    #[error("malformed listing payload: {0}")]
    Malformed(String),
}

/// Why a cross-page bulk selection stopped without a result
#[derive(Debug, Error)]
pub enum BulkError {
    /// The cancellation token fired
    #[error("bulk selection cancelled")]
    Cancelled,

    /// Fetching one of the pages failed
    #[error("fetching page {page} failed: {source}")]
    Fetch {
        /// Page whose fetch failed
        page: u32,
        /// Underlying fetch failure
        source: FetchError,
    },
}

impl From<BulkError> for Error {
    fn from(error: BulkError) -> Self {
        match error {
            BulkError::Cancelled => Error::Cancelled,
            BulkError::Fetch { source, .. } => Error::Fetch(source),
        }
    }
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "invalid_page",
///     "message": "invalid page number: 0 (pages start at 1)",
///     "details": {
///       "page": 0
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "invalid_page", "upstream_status")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::InvalidPage(_) => 400,
            Error::Fetch(FetchError::InvalidRequest { .. }) => 400,

            // 409 Conflict - superseded by a cancel request
            Error::Cancelled => 409,

            // 502 Bad Gateway - The museum API misbehaved
            Error::Fetch(FetchError::Network(_)) => 502,
            Error::Fetch(FetchError::Status { .. }) => 502,
            Error::Fetch(FetchError::Malformed(_)) => 502,

            // 500 Internal Server Error - Server-side issues
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Fetch(e) => match e {
                FetchError::InvalidRequest { .. } => "invalid_request",
                FetchError::Network(_) => "network_error",
                FetchError::Status { .. } => "upstream_status",
                FetchError::Malformed(_) => "malformed_payload",
            },
            Error::InvalidPage(_) => "invalid_page",
            Error::Cancelled => "cancelled",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::InvalidPage(page) => Some(serde_json::json!({
                "page": page,
            })),
            Error::Fetch(FetchError::Status { status, url }) => Some(serde_json::json!({
                "upstream_status": status,
                "url": url,
            })),
            Error::Fetch(FetchError::InvalidRequest { page, limit }) => {
                Some(serde_json::json!({
                    "page": page,
                    "limit": limit,
                }))
            }
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
