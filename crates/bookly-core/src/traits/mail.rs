//! Mail sender trait seam.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for outbound mail delivery.
///
/// Implementations deliver HTML mail to one or more recipients. Callers
/// treat delivery as fire-and-forget: sends are spawned onto background
/// tasks and failures are logged, never surfaced to the request that
/// triggered them.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send an HTML email to the given recipient addresses.
    async fn send_email(
        &self,
        addresses: &[String],
        subject: &str,
        html_body: &str,
    ) -> AppResult<()>;
}
