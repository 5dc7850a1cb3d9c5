//! # bookly-core
//!
//! Core crate for Bookly. Contains traits, configuration schemas,
//! pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Bookly crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
