//! Carts repository errors.

use thiserror::Error;

use crate::shopify::ShopifyError;

/// Carts repository failure.
#[derive(Debug, Error)]
pub enum CartsRepositoryError {
    /// No cart matches the id or token.
    #[error("cart not found")]
    NotFound,

    /// The gift product is missing or has no variants.
    #[error("gift product is missing or has no variants")]
    GiftUnavailable,

    /// A platform call failed.
    #[error("platform request failed")]
    Upstream(#[from] ShopifyError),
}
