//! Shared trait seams consumed across Bookly crates.

pub mod cache;
pub mod mail;

pub use cache::CacheProvider;
pub use mail::Mailer;
