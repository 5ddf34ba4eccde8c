//! User service - Handles user-related business logic.
//!
//! Validates requests, generates identifiers, hashes credentials and
//! delegates persistence to a [`UserStore`]. Store errors pass through
//! unchanged.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{
    generate_id, CreateUser, Password, UpdateUser, User, USER_AUTHENTICATED_MESSAGE,
    USER_DELETED_MESSAGE, USER_ID_PREFIX,
};

use crate::repository::UserStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Check credentials; returns the success message.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<String>;

    /// Create a user and return it as stored
    async fn create_user(&self, request: CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// Replace user details; returns the user as read back after the write
    async fn update_user(&self, request: UpdateUser) -> AppResult<User>;

    /// Delete user; returns the success message.
    async fn delete_user(&self, id: &str) -> AppResult<String>;
}

/// Concrete implementation of UserService using a store.
pub struct UserManager {
    store: Arc<dyn UserStore>,
}

impl UserManager {
    /// Create new user service instance with store
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

fn require(value: &str, field: &'static str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(())
}

fn parse_age(age: &str) -> AppResult<i32> {
    Ok(age.parse::<i32>()?)
}

impl UserManager {
    async fn try_authenticate(&self, username: &str, password: &str) -> AppResult<()> {
        require(username, "username")?;
        require(password, "password")?;
        self.store.authenticate(username, password).await
    }

    async fn try_create(&self, request: CreateUser) -> AppResult<User> {
        require(&request.name, "name")?;
        require(&request.password, "password")?;
        let age = parse_age(&request.age)?;

        let id = generate_id(USER_ID_PREFIX)?;
        let password = Password::new(&request.password)?;
        let user = User::new(
            id,
            request.name,
            password.into_string(),
            age,
            request.additional_information,
            request.parents,
        );

        self.store.create_user(&user).await?;
        Ok(user)
    }

    async fn try_get(&self, id: &str) -> AppResult<User> {
        require(id, "id")?;
        self.store.get_user(id).await
    }

    async fn try_update(&self, request: UpdateUser) -> AppResult<User> {
        require(&request.id, "id")?;
        let age = parse_age(&request.age)?;

        // password_hash stays empty; stores never write it on update
        let user = User::new(
            request.id,
            request.name,
            String::new(),
            age,
            request.additional_information,
            request.parents,
        );
        self.store.update_user(&user).await
    }

    async fn try_delete(&self, id: &str) -> AppResult<()> {
        require(id, "id")?;
        self.store.delete_user(id).await
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<String> {
        self.try_authenticate(username, password)
            .await
            .map_err(|e| {
                tracing::error!(username, "authenticate failed: {}", e);
                e
            })?;
        Ok(USER_AUTHENTICATED_MESSAGE.to_string())
    }

    async fn create_user(&self, request: CreateUser) -> AppResult<User> {
        self.try_create(request).await.map_err(|e| {
            tracing::error!("create_user failed: {}", e);
            e
        })
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        self.try_get(id).await.map_err(|e| {
            tracing::error!(user_id = id, "get_user failed: {}", e);
            e
        })
    }

    async fn update_user(&self, request: UpdateUser) -> AppResult<User> {
        self.try_update(request).await.map_err(|e| {
            tracing::error!("update_user failed: {}", e);
            e
        })
    }

    async fn delete_user(&self, id: &str) -> AppResult<String> {
        self.try_delete(id).await.map_err(|e| {
            tracing::error!(user_id = id, "delete_user failed: {}", e);
            e
        })?;
        Ok(USER_DELETED_MESSAGE.to_string())
    }
}
