//! Books collection

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, Document};

use super::DocumentCollection;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPatch, UpdateOutcome},
};

#[derive(Clone)]
pub struct BooksRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl BooksRepository {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.collection.ping().await
    }

    /// List every book
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.collection
            .find_all()
            .await?
            .into_iter()
            .map(Book::try_from)
            .collect()
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: ObjectId) -> AppResult<Book> {
        self.collection
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
            .and_then(Book::try_from)
    }

    /// Insert a new book document
    pub async fn create(&self, book: Document) -> AppResult<ObjectId> {
        self.collection.insert(book).await
    }

    /// Merge the patch into the stored book
    pub async fn update(&self, id: ObjectId, patch: BookPatch) -> AppResult<UpdateOutcome> {
        self.collection.set_fields(id, patch.into_document()).await
    }
}
