//! Account and authentication flows.

pub mod service;

pub use service::{AuthService, LoginOutcome, SignupData};
