//! BSON to wire-JSON rendering.
//!
//! The front-end expects ids as plain hex strings and timestamps as RFC
//! 3339 text, not the `$oid` / `$date` extended-JSON wrappers.

use bson::{Bson, Document};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde_json::{json, Map, Value};

/// Render an insert acknowledgement in the driver's wire shape.
pub fn insert_result_json(result: InsertOneResult) -> Value {
    json!({
        "acknowledged": true,
        "insertedId": bson_to_json(result.inserted_id),
    })
}

/// Render an update acknowledgement in the driver's wire shape.
pub fn update_result_json(result: UpdateResult) -> Value {
    json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedId": result.upserted_id.map(bson_to_json),
    })
}

/// Render a delete acknowledgement in the driver's wire shape.
pub fn delete_result_json(result: DeleteResult) -> Value {
    json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count,
    })
}

/// Render a list of documents for an API response.
pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

/// Render a single document for an API response.
pub fn document_to_json(doc: Document) -> Value {
    let mut map = Map::with_capacity(doc.len());
    for (key, value) in doc {
        map.insert(key, bson_to_json(value));
    }
    Value::Object(map)
}

/// Render a single BSON value for an API response.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(dt.to_chrono().to_rfc3339()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    #[test]
    fn test_object_id_renders_as_hex() {
        let oid = ObjectId::parse_str("65f0a1b2c3d4e5f6a7b8c9d0").unwrap();
        let json = document_to_json(doc! { "_id": oid, "title": "Tutoring" });
        assert_eq!(json["_id"], "65f0a1b2c3d4e5f6a7b8c9d0");
        assert_eq!(json["title"], "Tutoring");
    }

    #[test]
    fn test_nested_values_render_recursively() {
        let oid = ObjectId::parse_str("65f0a1b2c3d4e5f6a7b8c9d0").unwrap();
        let json = document_to_json(doc! {
            "owner": { "ref": oid },
            "tags": ["a", "b"],
            "count": 3_i64,
        });
        assert_eq!(json["owner"]["ref"], "65f0a1b2c3d4e5f6a7b8c9d0");
        assert_eq!(json["tags"][1], "b");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn test_datetime_renders_as_rfc3339() {
        let dt = bson::DateTime::from_millis(0);
        let json = document_to_json(doc! { "created_at": dt });
        let rendered = json["created_at"].as_str().unwrap();
        assert!(rendered.starts_with("1970-01-01T00:00:00"));
    }
}
