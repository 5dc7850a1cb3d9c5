//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP mail delivery API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Base URL of the mail delivery API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sender address placed on outgoing mail.
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Public base URL of the application, used to build verification and
    /// password-reset links.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sender: default_sender(),
            timeout_seconds: default_timeout(),
            frontend_url: default_frontend_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8025".to_string()
}

fn default_sender() -> String {
    "noreply@bookly.local".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_frontend_url() -> String {
    "http://localhost:8000".to_string()
}
