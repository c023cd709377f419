//! Error types for the activity client.
//!
//! # Design
//! The backend is not expected to distinguish its failures in a way the
//! client acts on, so every non-2xx response lands in `RequestFailed` with
//! the request URL, the raw status code and the body text.

/// Errors returned by `ActivityClient` and its transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("could not fetch data from {url}: {status}: {body}")]
    RequestFailed { url: String, status: u16, body: String },

    /// A 2xx body could not be decoded into the expected envelope.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The page URL used to locate the backend could not be interpreted.
    #[error("invalid page url: {0}")]
    InvalidPageUrl(String),
}

impl ApiError {
    /// HTTP status of a failed request, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
