//! HTTP mail API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::error;

use bookly_core::config::mail::MailConfig;
use bookly_core::error::AppError;
use bookly_core::result::AppResult;
use bookly_core::traits::mail::Mailer;

/// Client for an HTTP mail delivery API.
#[derive(Debug, Clone)]
pub struct EmailClient {
    /// Shared HTTP client with connection pooling.
    http_client: reqwest::Client,
    /// Base URL of the mail API.
    base_url: String,
    /// Sender address placed on outgoing mail.
    sender: String,
}

/// Request body accepted by the mail API.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

impl EmailClient {
    /// Creates a new email client from configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::external_service(format!("Failed to build mail HTTP client: {e}"))
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sender: config.sender.clone(),
        })
    }
}

#[async_trait]
impl Mailer for EmailClient {
    async fn send_email(
        &self,
        addresses: &[String],
        subject: &str,
        html_body: &str,
    ) -> AppResult<()> {
        let url = format!("{}/email", self.base_url);
        let request = SendEmailRequest {
            from: &self.sender,
            to: addresses,
            subject,
            html: html_body,
        };

        self.http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach mail API");
                AppError::external_service(format!("Failed to send email: {e}"))
            })?
            .error_for_status()
            .map_err(|e| {
                error!(error = %e, "Mail API returned an error status");
                AppError::external_service(format!("Mail delivery rejected: {e}"))
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = MailConfig {
            base_url: "http://mail.local/".to_string(),
            sender: "noreply@bookly.local".to_string(),
            timeout_seconds: 5,
            frontend_url: "http://localhost:8000".to_string(),
        };
        let client = EmailClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://mail.local");
    }
}
