//! In-process collections with the same update semantics as the document store

use async_trait::async_trait;
use indexmap::IndexMap;
use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;

use super::DocumentCollection;
use crate::{error::AppResult, models::document::ID_FIELD, models::UpdateOutcome};

/// Documents kept in insertion order, keyed by identifier
#[derive(Default)]
pub struct MemoryCollection {
    documents: RwLock<IndexMap<ObjectId, Document>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        Ok(self.documents.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Document>> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn insert(&self, document: Document) -> AppResult<ObjectId> {
        let id = document
            .get_object_id(ID_FIELD)
            .unwrap_or_else(|_| ObjectId::new());

        let mut stored = Document::new();
        stored.insert(ID_FIELD, id);
        for (key, value) in document {
            if key != ID_FIELD {
                stored.insert(key, value);
            }
        }

        self.documents.write().await.insert(id, stored);
        Ok(id)
    }

    async fn set_fields(&self, id: ObjectId, fields: Document) -> AppResult<UpdateOutcome> {
        let mut documents = self.documents.write().await;
        let Some(stored) = documents.get_mut(&id) else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        for (key, value) in fields {
            if stored.get(&key) != Some(&value) {
                stored.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> AppResult<u64> {
        let removed = self.documents.write().await.shift_remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_insert_assigns_identifier_first() {
        let collection = MemoryCollection::new();
        let id = collection.insert(doc! { "title": "Dune" }).await.unwrap();

        let stored = collection.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.keys().next().map(String::as_str), Some(ID_FIELD));
        assert_eq!(stored.get_object_id(ID_FIELD).unwrap(), id);
        assert_eq!(stored.get_str("title").unwrap(), "Dune");
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let collection = MemoryCollection::new();
        for title in ["Dune", "Emma", "Ulysses"] {
            collection.insert(doc! { "title": title }).await.unwrap();
        }
        let titles: Vec<_> = collection
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|d| d.get_str("title").unwrap().to_string())
            .collect();
        assert_eq!(titles, ["Dune", "Emma", "Ulysses"]);
    }

    #[tokio::test]
    async fn test_set_fields_counts() {
        let collection = MemoryCollection::new();
        let id = collection
            .insert(doc! { "title": "Dune", "quantity": 5_i64 })
            .await
            .unwrap();

        let changed = collection.set_fields(id, doc! { "quantity": 4_i64 }).await.unwrap();
        assert_eq!(changed, UpdateOutcome { matched_count: 1, modified_count: 1 });

        let unchanged = collection.set_fields(id, doc! { "quantity": 4_i64 }).await.unwrap();
        assert_eq!(unchanged, UpdateOutcome { matched_count: 1, modified_count: 0 });

        let missing = collection
            .set_fields(ObjectId::new(), doc! { "quantity": 1_i64 })
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::default());

        let stored = collection.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.get_str("title").unwrap(), "Dune");
        assert_eq!(stored.get_i64("quantity").unwrap(), 4);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let collection = MemoryCollection::new();
        let id = collection.insert(doc! { "book": "Dune" }).await.unwrap();

        assert_eq!(collection.delete_by_id(id).await.unwrap(), 1);
        assert_eq!(collection.delete_by_id(id).await.unwrap(), 0);
        assert!(collection.is_empty().await);
    }
}
