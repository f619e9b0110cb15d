//! Webhooks service errors.

use thiserror::Error;

use crate::shopify::ShopifyError;

/// Webhook registration failure.
#[derive(Debug, Error)]
pub enum WebhooksServiceError {
    /// No public base URL was configured.
    #[error("no public callback URL is configured")]
    MissingCallbackUrl,

    /// The public base URL cannot take the notification path.
    #[error("callback URL cannot carry a path: {0}")]
    InvalidCallbackUrl(String),

    /// A platform call failed.
    #[error("platform request failed")]
    Upstream(#[from] ShopifyError),
}
