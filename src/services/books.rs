//! Book catalog service

use crate::{
    error::AppResult,
    models::{book::UpdateBookResponse, document, Book, BookPatch, InsertAck, JsonMap},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        let id = document::parse_id(id)?;
        self.repository.books.get_by_id(id).await
    }

    /// Store the book record as supplied
    pub async fn create(&self, book: JsonMap) -> AppResult<InsertAck> {
        let id = self.repository.books.create(document::from_json(book)?).await?;
        tracing::info!("Book {} created", id);
        Ok(InsertAck::new(id.to_hex()))
    }

    /// Merge the given fields into a book.
    ///
    /// A patch holding only `quantity` is reported as a quantity update.
    pub async fn update(&self, id: &str, fields: JsonMap) -> AppResult<UpdateBookResponse> {
        let id = document::parse_id(id)?;
        let patch = BookPatch::new(fields)?;
        let quantity_only = patch.is_quantity_only();

        let outcome = self.repository.books.update(id, patch).await?;
        tracing::debug!(
            "Book {} update matched {} modified {}",
            id,
            outcome.matched_count,
            outcome.modified_count
        );

        Ok(UpdateBookResponse::from_outcome(quantity_only, outcome))
    }
}
