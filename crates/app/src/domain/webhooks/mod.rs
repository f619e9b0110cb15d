//! Webhook subscriptions

pub mod errors;
pub mod models;
pub mod service;

pub use errors::WebhooksServiceError;
pub use service::*;
