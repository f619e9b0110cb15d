//! Freebie Domain Concerns

pub mod carts;
pub mod gifts;
pub mod notifications;
pub mod webhooks;
