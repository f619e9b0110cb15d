//! Shopify client errors.

use thiserror::Error;

/// Errors that can occur when talking to the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// An HTTP transport or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered with a non-2xx status.
    #[error("{operation} failed with status {status}: {body}")]
    UnexpectedResponse {
        /// Call that failed, e.g. `fetch draft order`.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },
}

impl ShopifyError {
    /// HTTP status returned by Shopify, when the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(source) => source.status().map(|status| status.as_u16()),
            Self::UnexpectedResponse { status, .. } => Some(*status),
        }
    }
}
