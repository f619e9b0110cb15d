//! Carts

pub mod errors;
pub mod models;
pub mod repository;

pub use errors::CartsRepositoryError;
pub use repository::*;
