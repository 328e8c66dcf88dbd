use super::*;

impl UserService {
    /// Authenticates a user with email and password.
    ///
    /// Consults the login limiter first and returns `AppError::RateLimited`
    /// while the identifier is blocked. Returns `AuthOutcome::Failed` with no
    /// detail for any credential failure (unknown email, wrong password) to
    /// prevent enumeration.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let status = self.limiters.login.check(email);
        if status.limited {
            return Err(rate_limited_error(status.reset_time));
        }

        let user = self.user_repository.find_by_email(email).await?;

        let Some(user) = user else {
            // Always hash to prevent timing attacks even when user not found.
            let _ = self.password_hasher.hash_password(password);
            self.limiters.login.record_failure(email);
            return Ok(AuthOutcome::Failed);
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            self.limiters.login.record_failure(email);
            return Ok(AuthOutcome::Failed);
        }

        // Correct password forgives all prior failures for this identifier.
        self.limiters.login.record_success(email);

        Ok(AuthOutcome::Authenticated(user))
    }
}
