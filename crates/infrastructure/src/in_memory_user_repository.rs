//! In-memory user repository.
//!
//! Backs the staff portal in environments without the hosted user store.
//! Emails are normalized to lowercase on write so lookups stay
//! case-insensitive. State is lost on process restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bridgeworks_application::{UserRecord, UserRepository};
use bridgeworks_core::{AppError, AppResult};
use bridgeworks_domain::UserId;

/// Thread-safe in-memory implementation of [`UserRepository`].
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_users(&self) -> MutexGuard<'_, HashMap<UserId, UserRecord>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let users = self.lock_users();
        Ok(users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        display_name: &str,
        company: Option<&str>,
    ) -> AppResult<UserId> {
        let mut users = self.lock_users();

        if users
            .values()
            .any(|user| user.email.eq_ignore_ascii_case(email))
        {
            return Err(AppError::Conflict(format!(
                "a user with email '{email}' already exists"
            )));
        }

        let user_id = UserId::new();
        users.insert(
            user_id,
            UserRecord {
                id: user_id,
                email: email.to_lowercase(),
                password_hash: password_hash.to_owned(),
                display_name: display_name.to_owned(),
                company: company.map(str::to_owned),
            },
        );

        Ok(user_id)
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        let mut users = self.lock_users();
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;

        user.password_hash = password_hash.to_owned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find_is_case_insensitive() -> AppResult<()> {
        let repo = InMemoryUserRepository::new();
        repo.create("alice@acme.dev", "hash", "Alice", Some("Acme"))
            .await?;

        let found = repo.find_by_email("ALICE@ACME.DEV").await?;
        assert!(found.is_some_and(|user| user.email == "alice@acme.dev"));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_create_is_a_conflict() -> AppResult<()> {
        let repo = InMemoryUserRepository::new();
        repo.create("alice@acme.dev", "hash", "Alice", None).await?;

        let result = repo.create("Alice@Acme.dev", "hash2", "Alice", None).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_password_replaces_the_stored_hash() -> AppResult<()> {
        let repo = InMemoryUserRepository::new();
        let user_id = repo.create("alice@acme.dev", "old", "Alice", None).await?;

        repo.update_password(user_id, "new").await?;

        let found = repo.find_by_email("alice@acme.dev").await?;
        assert!(found.is_some_and(|user| user.password_hash == "new"));
        Ok(())
    }

    #[tokio::test]
    async fn update_password_for_unknown_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update_password(UserId::new(), "new").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
