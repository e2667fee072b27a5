//! Transport error types.
//!
//! - [`HttpResponseError`]: non-2xx answers from the webservice
//! - [`MaxHttpRetriesExceededError`]: retry budget exhausted on 429/500
//! - [`InvalidHttpRequestError`]: a request failing validation before it is sent
//! - [`TransportError`]: the unified error returned by every transport call
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_mapper::clients::TransportError;
//!
//! match client.check("taxes", 1).await {
//!     Ok(exists) => println!("exists: {exists}"),
//!     Err(TransportError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(e) => println!("transport failure: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::xml::XmlError;

/// Error returned when the webservice answers with a non-successful status.
///
/// The message carries the error texts reported in the `<errors>` element
/// of the body, or the raw body when it has no such element.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 401,
///     message: "Authentication key is empty".to_string(),
/// };
/// assert_eq!(error.to_string(), "HTTP 401: Authentication key is empty");
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error message extracted from the response body.
    pub message: String,
}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A body was attached to a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that was given a body.
        method: String,
    },
}

/// Unified error type for transport calls.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body is not a readable document.
    #[error("Unreadable response document: {0}")]
    Document(#[from] XmlError),
}

impl TransportError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns `true` if the webservice answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

// Verify TransportError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
};
