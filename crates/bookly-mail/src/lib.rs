//! # bookly-mail
//!
//! Outbound mail delivery for Bookly via an HTTP mail API. Implements the
//! [`Mailer`](bookly_core::traits::Mailer) trait so services stay decoupled
//! from the transport.

pub mod client;

pub use client::EmailClient;
