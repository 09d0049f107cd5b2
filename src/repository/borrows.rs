//! Borrow records collection

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, Document};

use super::DocumentCollection;
use crate::{error::AppResult, models::BorrowRecord};

#[derive(Clone)]
pub struct BorrowsRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl BorrowsRepository {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// List every borrow record
    pub async fn list(&self) -> AppResult<Vec<BorrowRecord>> {
        self.collection
            .find_all()
            .await?
            .into_iter()
            .map(BorrowRecord::try_from)
            .collect()
    }

    pub async fn create(&self, record: Document) -> AppResult<ObjectId> {
        self.collection.insert(record).await
    }

    /// Delete a borrow record; deleting an unknown one is not an error
    pub async fn delete(&self, id: ObjectId) -> AppResult<u64> {
        self.collection.delete_by_id(id).await
    }
}
