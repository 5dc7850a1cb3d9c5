//! Book catalog operations.

pub mod service;

pub use service::{BookDetail, BookService};
