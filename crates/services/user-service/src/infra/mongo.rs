//! Document database connection.

use mongodb::{bson::doc, error::Result as MongoResult, Client};

use common::DocumentStoreConfig;

/// Handle to the configured document database.
#[derive(Clone)]
pub struct DocumentDatabase {
    database: mongodb::Database,
}

impl DocumentDatabase {
    /// Connect and check the server answers.
    pub async fn connect(config: &DocumentStoreConfig) -> MongoResult<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let db = Self {
            database: client.database(&config.database),
        };
        db.ping().await?;
        tracing::info!(database = %config.database, "Document database connected");

        Ok(db)
    }

    pub fn database(&self) -> &mongodb::Database {
        &self.database
    }

    pub async fn ping(&self) -> MongoResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
