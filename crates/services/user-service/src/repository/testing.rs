//! In-memory [`UserCollection`] for tests.

use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::{
    bson::{self, Bson, Document},
    error::{Error as MongoError, Result as MongoResult},
};

use super::collection::{UserCollection, UserDocument};

/// Collection operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOp {
    InsertOne,
    FindOne,
    FindOneAndUpdate,
    DeleteOne,
}

/// Vec-backed collection supporting equality filters and `$set` updates.
#[derive(Debug, Default)]
pub struct InMemoryUserCollection {
    documents: Mutex<Vec<UserDocument>>,
    failing: Vec<CollectionOp>,
}

impl InMemoryUserCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection whose listed operations always fail with an I/O error.
    pub fn failing(ops: &[CollectionOp]) -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            failing: ops.to_vec(),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<UserDocument>> {
        self.documents.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self, op: CollectionOp) -> MongoResult<()> {
        if self.failing.contains(&op) {
            let io = io::Error::new(io::ErrorKind::Other, format!("forced {:?} failure", op));
            return Err(MongoError::from(io));
        }
        Ok(())
    }

    fn matches(document: &UserDocument, filter: &Document) -> MongoResult<bool> {
        let stored = bson::to_document(document)?;
        Ok(filter
            .iter()
            .all(|(key, value)| stored.get(key) == Some(value)))
    }

    fn position(documents: &[UserDocument], filter: &Document) -> MongoResult<Option<usize>> {
        for (index, document) in documents.iter().enumerate() {
            if Self::matches(document, filter)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl UserCollection for InMemoryUserCollection {
    async fn insert_one(&self, document: &UserDocument) -> MongoResult<()> {
        self.check(CollectionOp::InsertOne)?;
        self.lock().push(document.clone());
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> MongoResult<Option<UserDocument>> {
        self.check(CollectionOp::FindOne)?;
        let documents = self.lock();
        Ok(Self::position(&documents, &filter)?.map(|index| documents[index].clone()))
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> MongoResult<Option<UserDocument>> {
        self.check(CollectionOp::FindOneAndUpdate)?;
        let mut documents = self.lock();
        let Some(index) = Self::position(&documents, &filter)? else {
            return Ok(None);
        };

        let mut stored = bson::to_document(&documents[index])?;
        if let Some(Bson::Document(set)) = update.get("$set") {
            for (key, value) in set {
                stored.insert(key.clone(), value.clone());
            }
        }

        let updated: UserDocument = bson::from_document(stored)?;
        documents[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_one(&self, filter: Document) -> MongoResult<u64> {
        self.check(CollectionOp::DeleteOne)?;
        let mut documents = self.lock();
        match Self::position(&documents, &filter)? {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
