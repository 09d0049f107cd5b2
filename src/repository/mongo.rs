//! MongoDB-backed collections

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database,
};

use super::{DocumentCollection, Repository, BOOK_COLLECTION, BORROW_COLLECTION, DATABASE_NAME};
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::UpdateOutcome,
};

/// Connect once, verify with a ping, and open both collections.
///
/// The client lives inside the returned collection handles for the rest of
/// the process; it is never closed explicitly.
pub async fn connect(config: &DatabaseConfig) -> AppResult<Repository> {
    let uri = config
        .connection_uri()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut options = ClientOptions::parse(&uri).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

    let client = Client::with_options(options)?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 }, None)
        .await?;
    tracing::info!("Pinged deployment, connected to MongoDB");

    let database = client.database(DATABASE_NAME);
    Ok(Repository::new(
        Arc::new(MongoCollection::new(&database, BOOK_COLLECTION)),
        Arc::new(MongoCollection::new(&database, BORROW_COLLECTION)),
    ))
}

pub struct MongoCollection {
    database: Database,
    collection: Collection<Document>,
}

impl MongoCollection {
    pub fn new(database: &Database, name: &str) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection::<Document>(name),
        }
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        let cursor = self.collection.find(None, None).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Document>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    async fn insert(&self, document: Document) -> AppResult<ObjectId> {
        let result = self.collection.insert_one(document, None).await?;
        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(AppError::Internal(format!(
                "{} insert returned non object id {}",
                self.collection.name(),
                other
            ))),
        }
    }

    async fn set_fields(&self, id: ObjectId, fields: Document) -> AppResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields }, None)
            .await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> AppResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }
}
