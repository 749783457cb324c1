//! Document payloads accepted by the API

use bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Parse a path id into an `ObjectId`, rejecting malformed input before it
/// reaches the driver.
pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// New service listing. The three named fields are the minimal required
/// shape; everything else the client sends rides along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewService {
    pub title: String,
    pub category: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Document,
}

/// New review. Reviews carry the reviewed category and the author email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub category: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Document,
}

/// Allow-listed fields for a service upsert-merge. Unknown keys in the
/// request body are dropped by serde; unset fields are skipped on
/// serialize, so the resulting `$set` touches only what the caller sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Allow-listed fields for a review upsert-merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Filter clauses for listing services. Empty strings count as absent so
/// `?filter=&search=` behaves like no filter at all.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// Exact owner email match
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("65f0a1b2c3d4e5f6a7b8c9d0").is_ok());
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(StoreError::InvalidId(_))
        ));
        assert!(parse_object_id("").is_err());
    }

    #[test]
    fn test_new_service_keeps_extra_fields() {
        let service: NewService = serde_json::from_value(json!({
            "title": "Tutoring",
            "category": "Education",
            "email": "a@x.com",
            "price": 25,
            "website": "https://example.com"
        }))
        .unwrap();

        assert_eq!(service.title, "Tutoring");
        assert!(matches!(
            service.extra.get("price"),
            Some(Bson::Int32(25)) | Some(Bson::Int64(25))
        ));
        assert_eq!(
            service.extra.get_str("website").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_new_service_requires_minimal_shape() {
        let missing_email = serde_json::from_value::<NewService>(json!({
            "title": "Tutoring",
            "category": "Education"
        }));
        assert!(missing_email.is_err());
    }

    #[test]
    fn test_service_patch_skips_unset_fields() {
        let patch: ServicePatch = serde_json::from_value(json!({
            "title": "New title",
            "price": 30
        }))
        .unwrap();

        let set_doc = bson::to_document(&patch).unwrap();
        assert_eq!(set_doc.len(), 2);
        assert_eq!(set_doc.get_str("title").unwrap(), "New title");
        assert!(set_doc.get("email").is_none());
    }

    #[test]
    fn test_service_patch_drops_unknown_fields() {
        let patch: ServicePatch = serde_json::from_value(json!({
            "title": "New title",
            "owner": "injected",
            "role": "admin"
        }))
        .unwrap();

        let set_doc = bson::to_document(&patch).unwrap();
        assert_eq!(set_doc.len(), 1);
        assert!(set_doc.get("owner").is_none());
        assert!(set_doc.get("role").is_none());
    }

    #[test]
    fn test_review_patch_accepts_numeric_rating() {
        let patch: ReviewPatch = serde_json::from_value(json!({
            "rating": 4.5,
            "text": "great"
        }))
        .unwrap();

        let set_doc = bson::to_document(&patch).unwrap();
        assert_eq!(set_doc.get_f64("rating").unwrap(), 4.5);
        assert_eq!(set_doc.get_str("text").unwrap(), "great");
    }
}
