//! MongoDB database connection and configuration

use bson::doc;
use mongodb::{options::ClientOptions, Client, Database, IndexModel};

use crate::error::StoreError;

/// MongoDB database wrapper
#[derive(Clone)]
pub struct MongoDb {
    client: Client,
    db: Database,
}

impl MongoDb {
    /// Connect to MongoDB
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }, None).await?;
        tracing::info!("Connected to MongoDB: {}", db_name);

        let instance = Self { client, db };

        // Ensure indexes exist
        instance.ensure_indexes().await?;

        Ok(instance)
    }

    /// Get database reference
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Get collection
    pub fn collection<T>(&self, name: &str) -> mongodb::Collection<T> {
        self.db.collection(name)
    }

    /// Ping the database to check connection
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Shut the client down, draining the connection pool.
    ///
    /// Clones of this handle share the pool; call this once after the
    /// server has stopped accepting requests.
    pub async fn close(self) {
        self.client.shutdown().await;
        tracing::info!("MongoDB connection closed");
    }

    /// Ensure all required indexes exist
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        // Services collection indexes
        self.create_indexes(
            collections::SERVICES,
            vec![
                IndexModel::builder().keys(doc! { "email": 1 }).build(),
                IndexModel::builder().keys(doc! { "category": 1 }).build(),
            ],
        )
        .await?;

        // Reviews collection indexes
        self.create_indexes(
            collections::REVIEWS,
            vec![
                IndexModel::builder().keys(doc! { "email": 1 }).build(),
                IndexModel::builder().keys(doc! { "category": 1 }).build(),
            ],
        )
        .await?;

        Ok(())
    }

    /// Helper to create indexes for a collection
    async fn create_indexes(
        &self,
        collection: &str,
        indexes: Vec<IndexModel>,
    ) -> Result<(), StoreError> {
        let coll = self.db.collection::<bson::Document>(collection);
        coll.create_indexes(indexes, None).await?;
        Ok(())
    }
}

/// Collection names
pub mod collections {
    pub const SERVICES: &str = "serviceInfo";
    pub const REVIEWS: &str = "reviewInfo";
}
