//! Shared provider error kinds and error value helpers.
//!
//! ```rust
//! use bprovider::{ProviderError, ProviderErrorKind};
//!
//! let missing = ProviderError::no_json_found("No valid JSON found in response");
//! assert_eq!(missing.kind, ProviderErrorKind::NoJsonFound);
//! assert!(!missing.retryable);
//!
//! let timeout = ProviderError::timeout("temporary timeout");
//! assert!(timeout.retryable);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The proxy returned no data at all.
    EmptyResponse,
    /// The completion service reported an `error` field.
    Api,
    /// The completion service reported a `failed` or `incomplete` status.
    RequestFailed,
    JsonParse,
    NoJsonFound,
    InvalidRequest,
    Authentication,
    RateLimited,
    Timeout,
    Transport,
    Unavailable,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::EmptyResponse, message, false)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Api, message, false)
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RequestFailed, message, false)
    }

    pub fn json_parse(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::JsonParse, message, false)
    }

    pub fn no_json_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::NoJsonFound, message, false)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message, false)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message, false)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message, true)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message, true)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message, true)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message, true)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message, false)
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ProviderError {}
