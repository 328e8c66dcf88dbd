use bridgeworks_domain::{EmailAddress, UserContext, evaluate_password};

use super::*;

impl UserService {
    /// Registers a new staff account with email and password.
    ///
    /// The candidate password is evaluated with the submitted profile as
    /// personal-information context, so passwords built from the user's own
    /// email, name, or company are rejected. Failed attempts (weak password,
    /// invalid email, duplicate account) all count against the signup limiter.
    pub async fn register(&self, params: RegisterParams) -> AppResult<UserId> {
        let status = self.limiters.signup.check(&params.email);
        if status.limited {
            return Err(rate_limited_error(status.reset_time));
        }

        let email_address = match EmailAddress::new(&params.email) {
            Ok(email_address) => email_address,
            Err(error) => {
                self.limiters.signup.record_failure(&params.email);
                return Err(error);
            }
        };

        let context = UserContext {
            email: Some(email_address.as_str().to_owned()),
            name: Some(params.display_name.clone()),
            company: params.company.clone(),
        };
        let strength = evaluate_password(&params.password, &self.password_requirements, Some(&context));

        if !strength.is_valid {
            self.limiters.signup.record_failure(&params.email);

            let message = if strength.feedback.is_empty() {
                "password is too weak, please choose a stronger one".to_owned()
            } else {
                strength.feedback.join("; ")
            };
            return Err(AppError::Validation(message));
        }

        let existing = self
            .user_repository
            .find_by_email(email_address.as_str())
            .await?;

        if existing.is_some() {
            // Do not reveal that the account exists. Still hash the password
            // to prevent timing side-channels.
            let _ = self.password_hasher.hash_password(&params.password);
            self.limiters.signup.record_failure(&params.email);
            return Err(AppError::Conflict(
                "a link to activate your account has been emailed to the address provided"
                    .to_owned(),
            ));
        }

        let password_hash = self.password_hasher.hash_password(&params.password)?;
        let user_id = self
            .user_repository
            .create(
                email_address.as_str(),
                &password_hash,
                &params.display_name,
                params.company.as_deref(),
            )
            .await?;

        self.limiters.signup.record_success(&params.email);

        Ok(user_id)
    }
}
