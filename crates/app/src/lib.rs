//! Shared gift reconciliation domain and Shopify client.

pub mod config;
pub mod context;
pub mod domain;
pub mod ids;
pub mod money;
pub mod shopify;

#[cfg(test)]
mod test;
