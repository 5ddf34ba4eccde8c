//! Document user store.
//!
//! Each user is a single document with its parents embedded, so every write
//! is one atomic document operation. Name uniqueness is only enforced if the
//! collection carries a unique `name` index.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::doc;

use common::{AppResult, OptionExt};
use domain::User;

use super::classify::classify_document_error;
use super::collection::{UserCollection, UserDocument, USERS_COLLECTION};
use super::user_store::{check_password, UserStore};

/// Concrete implementation of UserStore backed by a users collection.
#[derive(Clone)]
pub struct DocumentUserStore {
    collection: Arc<dyn UserCollection>,
}

impl DocumentUserStore {
    /// Create a store over any collection implementation
    pub fn new(collection: Arc<dyn UserCollection>) -> Self {
        Self { collection }
    }

    /// Create a store over the users collection of `database`
    pub fn from_database(database: &mongodb::Database) -> Self {
        Self::new(Arc::new(
            database.collection::<UserDocument>(USERS_COLLECTION),
        ))
    }
}

#[async_trait]
impl UserStore for DocumentUserStore {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<()> {
        let found = self
            .collection
            .find_one(doc! { "name": username })
            .await
            .map_err(classify_document_error)?;

        check_password(found.map(|d| d.password_hash), password)
    }

    async fn create_user(&self, user: &User) -> AppResult<()> {
        tracing::debug!(user_id = %user.id, "Inserting user document");
        self.collection
            .insert_one(&UserDocument::from(user))
            .await
            .map_err(classify_document_error)
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        self.collection
            .find_one(doc! { "user_id": id })
            .await
            .map_err(classify_document_error)?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn update_user(&self, user: &User) -> AppResult<User> {
        tracing::debug!(user_id = %user.id, "Updating user document");
        let update = doc! {
            "$set": {
                "name": user.name.as_str(),
                "age": user.age,
                "additional_information": user.additional_information.as_str(),
                "parents": user.parents.clone(),
            }
        };

        self.collection
            .find_one_and_update(doc! { "user_id": user.id.as_str() }, update)
            .await
            .map_err(classify_document_error)?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        tracing::debug!(user_id = %id, "Deleting user document");
        self.get_user(id).await?;

        self.collection
            .delete_one(doc! { "user_id": id })
            .await
            .map_err(classify_document_error)?;
        Ok(())
    }
}
