//! Email adapter that writes messages to the log instead of delivering them.
//!
//! Local and test deployments run without a mail relay, but the reset
//! notification still needs somewhere visible to land so the flow can be
//! exercised end to end.

use async_trait::async_trait;
use bridgeworks_application::EmailService;
use bridgeworks_core::AppResult;
use tracing::info;

/// Log-backed `EmailService` for deployments without a mail relay.
#[derive(Clone, Copy, Default)]
pub struct ConsoleEmailService;

impl ConsoleEmailService {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        info!(recipient = to, subject, body, "outbound email written to log");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logging_a_message_always_succeeds() -> AppResult<()> {
        ConsoleEmailService::new()
            .send_email(
                "casey@bridgeworks.test",
                "Reset your Bridgeworks password",
                "Hello Casey, a password reset was requested for your account.",
            )
            .await
    }
}
