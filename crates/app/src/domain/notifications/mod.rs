//! Cart update notifications

pub mod errors;
pub mod payload;

pub use errors::NotificationError;
pub use payload::{CartNotification, RawCartNotification};
