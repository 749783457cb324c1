//! Service listings collection

use bson::{doc, Document, Regex as BsonRegex};
use futures::TryStreamExt;
use mongodb::options::{FindOptions, UpdateOptions};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};

use crate::db::{collections, MongoDb};
use crate::error::StoreError;
use crate::models::{parse_object_id, NewService, ServiceFilter, ServicePatch};

pub struct ServiceStore {
    db: MongoDb,
}

impl ServiceStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    fn services(&self) -> mongodb::Collection<Document> {
        self.db.collection(collections::SERVICES)
    }

    /// Append a new service document.
    pub async fn insert(&self, service: &NewService) -> Result<InsertOneResult, StoreError> {
        let coll = self.db.collection::<NewService>(collections::SERVICES);
        Ok(coll.insert_one(service, None).await?)
    }

    /// List services matching the filter, in the store's natural order.
    pub async fn find(
        &self,
        filter: &ServiceFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreError> {
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self.services().find(filter_document(filter), options).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Fetch a single service by id.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let oid = parse_object_id(id)?;
        Ok(self.services().find_one(doc! { "_id": oid }, None).await?)
    }

    /// Merge the patch into the document matching id, creating it if
    /// absent. Fields the patch leaves unset survive.
    pub async fn upsert_by_id(
        &self,
        id: &str,
        patch: &ServicePatch,
    ) -> Result<UpdateResult, StoreError> {
        let oid = parse_object_id(id)?;
        let update = doc! { "$set": bson::to_document(patch)? };
        let options = UpdateOptions::builder().upsert(true).build();
        Ok(self
            .services()
            .update_one(doc! { "_id": oid }, update, options)
            .await?)
    }

    /// Remove at most one service. A missing id yields `deleted_count == 0`.
    pub async fn delete_by_id(&self, id: &str) -> Result<DeleteResult, StoreError> {
        let oid = parse_object_id(id)?;
        Ok(self.services().delete_one(doc! { "_id": oid }, None).await?)
    }
}

/// Build the query document from the filter clauses. User-supplied search
/// text is regex-escaped so it matches as a literal substring.
fn filter_document(filter: &ServiceFilter) -> Document {
    let mut query = Document::new();
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let regex = BsonRegex {
            pattern: regex::escape(search),
            options: "i".to_string(),
        };
        query.insert("title", doc! { "$regex": regex });
    }
    if let Some(category) = filter.category.as_deref().filter(|s| !s.is_empty()) {
        query.insert("category", category);
    }
    if let Some(email) = filter.email.as_deref() {
        query.insert("email", email);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_builds_empty_query() {
        let query = filter_document(&ServiceFilter::default());
        assert!(query.is_empty());
    }

    #[test]
    fn test_blank_params_add_no_clauses() {
        let filter = ServiceFilter {
            search: Some(String::new()),
            category: Some(String::new()),
            email: None,
        };
        assert!(filter_document(&filter).is_empty());
    }

    #[test]
    fn test_search_text_is_regex_escaped() {
        let filter = ServiceFilter {
            search: Some("c++ (advanced)".to_string()),
            ..Default::default()
        };
        let query = filter_document(&filter);
        let clause = query.get_document("title").unwrap();
        let regex = match clause.get("$regex").unwrap() {
            bson::Bson::RegularExpression(re) => re,
            other => panic!("expected regex, got {:?}", other),
        };
        assert_eq!(regex.pattern, r"c\+\+ \(advanced\)");
        assert_eq!(regex.options, "i");
    }

    #[test]
    fn test_category_and_email_are_exact_matches() {
        let filter = ServiceFilter {
            search: None,
            category: Some("Education".to_string()),
            email: Some("a@x.com".to_string()),
        };
        let query = filter_document(&filter);
        assert_eq!(query.get_str("category").unwrap(), "Education");
        assert_eq!(query.get_str("email").unwrap(), "a@x.com");
    }
}
