//! Borrow record model

use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::document::{self, JsonMap};
use crate::error::{AppError, AppResult};

/// A borrow: who borrowed, plus a copy of the book as it was at that moment.
///
/// The book snapshot is not a reference; later book updates do not reach it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BorrowRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "newBorrow")]
    pub new_borrow: Value,
    pub book: Value,
}

impl TryFrom<Document> for BorrowRecord {
    type Error = AppError;

    fn try_from(document: Document) -> AppResult<Self> {
        let (id, mut fields) = document::split_id(document)?;
        Ok(Self {
            id,
            new_borrow: fields.remove("newBorrow").unwrap_or(Value::Null),
            book: fields.remove("book").unwrap_or(Value::Null),
        })
    }
}

/// Create borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrow {
    /// Borrower details (name, email, return date, ...)
    #[serde(rename = "newBorrow")]
    #[schema(value_type = Object)]
    pub new_borrow: JsonMap,
    /// Snapshot of the borrowed book
    #[schema(value_type = Object)]
    pub book: JsonMap,
}

impl CreateBorrow {
    pub fn into_document(self) -> AppResult<Document> {
        Ok(doc! {
            "newBorrow": document::from_json(self.new_borrow)?,
            "book": document::object_to_document(self.book)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn test_create_borrow_keeps_both_parts() {
        let request: CreateBorrow = serde_json::from_value(json!({
            "newBorrow": { "name": "Alice", "email": "alice@example.com" },
            "book": { "_id": "652f1c2e9b1d4a3f8c0e1a2b", "title": "Dune" }
        }))
        .unwrap();

        let mut stored = request.into_document().unwrap();
        stored.insert("_id", ObjectId::new());
        let record = BorrowRecord::try_from(stored).unwrap();

        assert_eq!(record.new_borrow["name"], "Alice");
        assert_eq!(record.book["title"], "Dune");
        assert_eq!(record.book["_id"], "652f1c2e9b1d4a3f8c0e1a2b");
    }

    #[test]
    fn test_snapshot_keeps_extended_json_keys() {
        let request: CreateBorrow = serde_json::from_value(json!({
            "newBorrow": { "name": "Alice" },
            "book": { "_id": { "$oid": "652f1c2e9b1d4a3f8c0e1a2b" }, "title": "Dune" }
        }))
        .unwrap();

        let mut stored = request.into_document().unwrap();
        stored.insert("_id", ObjectId::new());
        let record = BorrowRecord::try_from(stored).unwrap();

        assert_eq!(record.book["_id"], json!({ "$oid": "652f1c2e9b1d4a3f8c0e1a2b" }));
    }

    #[test]
    fn test_missing_parts_are_rejected() {
        let parsed = serde_json::from_value::<CreateBorrow>(json!({ "newBorrow": {} }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = BorrowRecord {
            id: "652f1c2e9b1d4a3f8c0e1a2b".to_string(),
            new_borrow: json!({ "name": "Alice" }),
            book: json!({ "title": "Dune" }),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["newBorrow"]["name"], "Alice");
        assert_eq!(value["_id"], "652f1c2e9b1d4a3f8c0e1a2b");
    }
}
