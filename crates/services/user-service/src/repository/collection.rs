//! Document shape and the driver seam of the document store.

use async_trait::async_trait;
use mongodb::{
    bson::Document,
    error::Result as MongoResult,
    options::ReturnDocument,
    Collection,
};
use serde::{Deserialize, Serialize};

use domain::User;

/// Name of the collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

/// A user with its parents embedded, as stored in the document database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
    pub user_id: String,
    pub name: String,
    pub password_hash: String,
    pub age: i32,
    #[serde(default)]
    pub additional_information: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            password_hash: user.password_hash.clone(),
            age: user.age,
            additional_information: user.additional_information.clone(),
            parents: user.parents.clone(),
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: doc.user_id,
            name: doc.name,
            password_hash: doc.password_hash,
            age: doc.age,
            additional_information: doc.additional_information,
            parents: doc.parents,
        }
    }
}

/// The collection operations the document store relies on.
#[async_trait]
pub trait UserCollection: Send + Sync {
    async fn insert_one(&self, document: &UserDocument) -> MongoResult<()>;

    async fn find_one(&self, filter: Document) -> MongoResult<Option<UserDocument>>;

    /// Apply `update` to the first match and return it as it is afterwards.
    /// Never inserts.
    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> MongoResult<Option<UserDocument>>;

    /// Returns the number of deleted documents.
    async fn delete_one(&self, filter: Document) -> MongoResult<u64>;
}

#[async_trait]
impl UserCollection for Collection<UserDocument> {
    async fn insert_one(&self, document: &UserDocument) -> MongoResult<()> {
        Collection::insert_one(self, document).await?;
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> MongoResult<Option<UserDocument>> {
        Collection::find_one(self, filter).await
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> MongoResult<Option<UserDocument>> {
        Collection::find_one_and_update(self, filter, update)
            .return_document(ReturnDocument::After)
            .upsert(false)
            .await
    }

    async fn delete_one(&self, filter: Document) -> MongoResult<u64> {
        let result = Collection::delete_one(self, filter).await?;
        Ok(result.deleted_count)
    }
}
