//! Webhook Handlers

pub(crate) mod notification;
pub(crate) mod register;
