//! Cart Handlers

pub(crate) mod check;
