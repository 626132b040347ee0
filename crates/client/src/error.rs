//! Client-side error type.

use thiserror::Error;

/// Errors from cart API round-trips.
///
/// Callers treat every variant the same way: log it and leave the local
/// mirror untouched. There is no retry.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network unreachable, malformed response body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `success: false`.
    #[error("server rejected the request")]
    Rejected,

    /// Endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
