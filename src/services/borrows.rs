//! Borrow records service

use crate::{
    error::AppResult,
    models::{document, BorrowRecord, CreateBorrow, DeleteAck, InsertAck},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BorrowRecord>> {
        self.repository.borrows.list().await
    }

    /// Record a borrow; the book snapshot is stored as given
    pub async fn create(&self, request: CreateBorrow) -> AppResult<InsertAck> {
        let id = self.repository.borrows.create(request.into_document()?).await?;
        tracing::info!("Borrow {} recorded", id);
        Ok(InsertAck::new(id.to_hex()))
    }

    /// Delete a borrow record (return or cancel)
    pub async fn delete(&self, id: &str) -> AppResult<DeleteAck> {
        let id = document::parse_id(id)?;
        let deleted = self.repository.borrows.delete(id).await?;
        Ok(DeleteAck::new(deleted))
    }
}
