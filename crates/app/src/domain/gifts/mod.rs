//! Threshold gifts

pub mod models;
pub mod plan;
pub mod predicate;
pub mod service;
pub mod threshold;

pub use service::*;
