//! Notification errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    /// Neither `id` nor `token` names a cart.
    #[error("notification names no cart id or token")]
    MissingIdentity,
}
