//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        attempts: u32,
        last_error: Box<HttpError>,
    },
}

/// Failure classes surfaced by the market-data pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response was received (network, DNS, timeout).
    TransportFailure,
    /// A response arrived with a status outside the success range.
    HttpFailure,
    /// The response parsed but lacks required identity fields.
    MalformedPayload,
    /// The caller supplied an option outside the enumerated set.
    InvalidOption,
}

impl HttpError {
    /// True when no HTTP response was received at all.
    pub fn is_transport(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => !e.is_status() && !e.is_decode(),
            HttpError::Transport(_) | HttpError::Timeout => true,
            HttpError::MaxRetriesExceeded { last_error, .. } => last_error.is_transport(),
            _ => false,
        }
    }
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::Http(e) if e.is_transport() => ErrorKind::TransportFailure,
            #[cfg(feature = "http")]
            SdkError::Http(HttpError::Reqwest(e)) if e.is_decode() => ErrorKind::MalformedPayload,
            SdkError::Http(_) => ErrorKind::HttpFailure,
            SdkError::MalformedPayload(_) | SdkError::Serde(_) => ErrorKind::MalformedPayload,
            SdkError::InvalidOption(_) => ErrorKind::InvalidOption,
        }
    }
}
