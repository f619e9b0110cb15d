//! Shopify Admin API integration

mod client;
mod errors;
pub mod payloads;

pub use client::{ShopifyClient, ShopifyConfig};
pub use errors::ShopifyError;
