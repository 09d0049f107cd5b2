//! Repository layer for document store operations

pub mod books;
pub mod borrows;
pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::{
    config::{DatabaseConfig, StoreDriver},
    error::AppResult,
    models::UpdateOutcome,
};

/// Logical database holding both collections
pub const DATABASE_NAME: &str = "libraryPulse";
pub const BOOK_COLLECTION: &str = "book";
pub const BORROW_COLLECTION: &str = "borrow";

/// Operations the handlers need from one named collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Round trip to the store
    async fn ping(&self) -> AppResult<()>;

    /// All documents in natural order
    async fn find_all(&self) -> AppResult<Vec<Document>>;

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Document>>;

    /// Insert a document and return its generated identifier
    async fn insert(&self, document: Document) -> AppResult<ObjectId>;

    /// Merge `fields` into the document with the given identifier (`$set`)
    async fn set_fields(&self, id: ObjectId, fields: Document) -> AppResult<UpdateOutcome>;

    /// Delete by identifier, returning the number of removed documents
    async fn delete_by_id(&self, id: ObjectId) -> AppResult<u64>;
}

/// Main repository struct holding the collection handles
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a repository over the given collections
    pub fn new(
        books: Arc<dyn DocumentCollection>,
        borrows: Arc<dyn DocumentCollection>,
    ) -> Self {
        Self {
            books: books::BooksRepository::new(books),
            borrows: borrows::BorrowsRepository::new(borrows),
        }
    }

    /// Repository backed by process-local collections
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(memory::MemoryCollection::new()),
            Arc::new(memory::MemoryCollection::new()),
        )
    }

    /// Open the store selected by configuration
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.driver {
            StoreDriver::Mongodb => mongo::connect(config).await,
            StoreDriver::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.books.ping().await
    }
}
