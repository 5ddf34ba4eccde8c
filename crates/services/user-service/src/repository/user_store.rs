//! Storage contract shared by both backends.

use async_trait::async_trait;

use common::{AppError, AppResult};
use domain::{Password, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User store trait for dependency injection.
///
/// Both implementations classify their driver errors before returning, so
/// callers only ever see [`AppError`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Check a name/password pair against the stored hash.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<()>;

    /// Persist a new user together with its parents.
    async fn create_user(&self, user: &User) -> AppResult<()>;

    /// Load a user and its parents by ID.
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// Replace name, age, additional information and parents.
    ///
    /// The stored password hash is never touched. Returns the user as read
    /// back after the write.
    async fn update_user(&self, user: &User) -> AppResult<User>;

    /// Remove a user and its parents.
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Verify `password` against the hash looked up for a user, if any.
pub(crate) fn check_password(stored_hash: Option<String>, password: &str) -> AppResult<()> {
    let Some(hash) = stored_hash else {
        Password::verify_decoy(password);
        return Err(AppError::NotFound);
    };

    if Password::from_hash(hash).verify(password) {
        Ok(())
    } else {
        Err(AppError::WrongPassword)
    }
}
