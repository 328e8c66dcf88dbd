use super::*;

impl UserService {
    /// Handles a password-reset request for the given email.
    ///
    /// Every request counts against the reset limiter, whether or not the
    /// account exists; the caller always receives the same generic message.
    /// When the account does exist, a reset notification goes out through the
    /// email port.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let status = self.limiters.password_reset.check(email);
        if status.limited {
            return Err(rate_limited_error(status.reset_time));
        }

        // Each reset request consumes an attempt; there is no "success" that
        // clears the counter short of the window expiring.
        self.limiters.password_reset.record_failure(email);

        if let Some(user) = self.user_repository.find_by_email(email).await? {
            let body = format!(
                "Hello {},\n\nA password reset was requested for your Bridgeworks \
                 account. If this was you, follow the link in your staff portal to \
                 choose a new password. If not, you can ignore this message.",
                user.display_name
            );

            self.email_service
                .send_email(&user.email, "Reset your Bridgeworks password", &body)
                .await?;
        }

        Ok(())
    }
}
