//! Book model and update payloads

use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::document::{self, JsonMap};
use super::ack::UpdateOutcome;
use crate::error::{AppError, AppResult};

/// Field updated by the quantity-only variant of a book update
pub const QUANTITY_FIELD: &str = "quantity";

/// Book document as returned to clients.
///
/// Apart from the identifier the record is open-ended: whatever fields were
/// supplied at creation are stored and returned unchanged.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: JsonMap,
}

impl Book {
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn quantity(&self) -> Option<i64> {
        self.fields.get(QUANTITY_FIELD).and_then(Value::as_i64)
    }
}

impl TryFrom<Document> for Book {
    type Error = AppError;

    fn try_from(document: Document) -> AppResult<Self> {
        let (id, fields) = document::split_id(document)?;
        Ok(Self { id, fields })
    }
}

/// Commonly supplied book fields. Any other properties are accepted and stored as-is.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    /// Copies available for borrowing
    pub quantity: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

/// Validated set of fields to merge into an existing book
#[derive(Debug, Clone)]
pub struct BookPatch {
    fields: Document,
}

impl BookPatch {
    pub fn new(fields: JsonMap) -> AppResult<Self> {
        if fields.is_empty() {
            return Err(AppError::BadRequest(
                "Update must contain at least one field".to_string(),
            ));
        }
        Ok(Self {
            fields: document::from_json(fields)?,
        })
    }

    /// The patch touches nothing but `quantity`
    pub fn is_quantity_only(&self) -> bool {
        self.fields.len() == 1 && self.fields.contains_key(QUANTITY_FIELD)
    }

    pub fn into_document(self) -> Document {
        self.fields
    }
}

/// Result of a book update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct UpdateBookResponse {
    pub success: bool,
    pub message: String,
}

impl UpdateBookResponse {
    pub fn from_outcome(quantity_only: bool, outcome: UpdateOutcome) -> Self {
        let message = match (quantity_only, outcome.is_applied()) {
            (true, true) => "Quantity updated successfully",
            (true, false) => "Book not found",
            (false, true) => "Book updated successfully",
            (false, false) => "Book not found or not modified",
        };
        Self {
            success: outcome.is_applied(),
            message: message.to_string(),
        }
    }
}
