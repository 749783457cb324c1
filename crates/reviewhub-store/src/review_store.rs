//! User reviews collection

use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::UpdateOptions;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};

use crate::db::{collections, MongoDb};
use crate::error::StoreError;
use crate::models::{parse_object_id, NewReview, ReviewPatch};

pub struct ReviewStore {
    db: MongoDb,
}

impl ReviewStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    fn reviews(&self) -> mongodb::Collection<Document> {
        self.db.collection(collections::REVIEWS)
    }

    /// Append a new review document.
    pub async fn insert(&self, review: &NewReview) -> Result<InsertOneResult, StoreError> {
        let coll = self.db.collection::<NewReview>(collections::REVIEWS);
        Ok(coll.insert_one(review, None).await?)
    }

    /// List reviews for an exact category.
    pub async fn find_by_category(&self, category: &str) -> Result<Vec<Document>, StoreError> {
        self.find(doc! { "category": category }).await
    }

    /// List reviews authored by an exact email.
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Document>, StoreError> {
        self.find(doc! { "email": email }).await
    }

    /// Merge the patch into the review matching id, creating it if absent.
    pub async fn upsert_by_id(
        &self,
        id: &str,
        patch: &ReviewPatch,
    ) -> Result<UpdateResult, StoreError> {
        let oid = parse_object_id(id)?;
        let update = doc! { "$set": bson::to_document(patch)? };
        let options = UpdateOptions::builder().upsert(true).build();
        Ok(self
            .reviews()
            .update_one(doc! { "_id": oid }, update, options)
            .await?)
    }

    /// Remove at most one review. A missing id yields `deleted_count == 0`.
    pub async fn delete_by_id(&self, id: &str) -> Result<DeleteResult, StoreError> {
        let oid = parse_object_id(id)?;
        Ok(self.reviews().delete_one(doc! { "_id": oid }, None).await?)
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.reviews().find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }
}
