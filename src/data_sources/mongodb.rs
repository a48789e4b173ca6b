//! MongoDB document backend.
//!
//! Operates on a single configured collection. JSON documents are converted
//! to BSON on the way in and back to JSON on the way out.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Client;
use mongodb::bson;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::info;

use super::{Database, DataSourceError, Document, RetryPolicy};
use crate::core::config::MongoConfig;

/// MongoDB-backed document store.
pub struct MongoStore {
    config: MongoConfig,
    client: OnceCell<Client>,
    retry: RetryPolicy,
}

impl MongoStore {
    /// Create a new store for the given connection settings.
    pub fn new(config: MongoConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
            retry: RetryPolicy::database(),
        }
    }

    /// Get (or lazily establish) the client, verifying the server responds.
    async fn collection(&self) -> Result<mongodb::Collection<bson::Document>, DataSourceError> {
        let client = self
            .client
            .get_or_try_init(|| async {
                let client = Client::with_uri_str(&self.config.uri)
                    .await
                    .map_err(|e| DataSourceError::Connection(e.to_string()))?;
                client
                    .list_database_names()
                    .await
                    .map_err(|e| DataSourceError::Connection(e.to_string()))?;
                info!(
                    "Connected to MongoDB: {}.{}",
                    self.config.database, self.config.collection
                );
                Ok::<_, DataSourceError>(client)
            })
            .await?;

        Ok(client
            .database(&self.config.database)
            .collection(&self.config.collection))
    }

    fn to_bson(doc: &Document) -> Result<bson::Document, DataSourceError> {
        bson::to_document(&Value::Object(doc.clone()))
            .map_err(|e| DataSourceError::InvalidDocument(e.to_string()))
    }

    fn to_json(doc: bson::Document) -> Result<Document, DataSourceError> {
        match serde_json::to_value(&doc) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(DataSourceError::InvalidDocument(
                "document did not serialize to an object".to_string(),
            )),
            Err(e) => Err(DataSourceError::InvalidDocument(e.to_string())),
        }
    }
}

#[async_trait]
impl Database for MongoStore {
    async fn read(&self, filter: &Document) -> Result<Vec<Document>, DataSourceError> {
        let collection = self.collection().await?;
        let filter = Self::to_bson(filter)?;

        let docs: Vec<bson::Document> = self
            .retry
            .run("mongodb find", || {
                let collection = collection.clone();
                let filter = filter.clone();
                async move {
                    let cursor = collection
                        .find(filter)
                        .await
                        .map_err(|e| DataSourceError::Query(e.to_string()))?;
                    cursor
                        .try_collect()
                        .await
                        .map_err(|e| DataSourceError::Query(e.to_string()))
                }
            })
            .await?;

        docs.into_iter().map(Self::to_json).collect()
    }

    async fn write(&self, document: &Document) -> Result<(), DataSourceError> {
        let collection = self.collection().await?;
        let document = Self::to_bson(document)?;

        self.retry
            .run("mongodb insert_one", || {
                let collection = collection.clone();
                let document = document.clone();
                async move {
                    collection
                        .insert_one(document)
                        .await
                        .map(|_| ())
                        .map_err(|e| DataSourceError::Query(e.to_string()))
                }
            })
            .await
    }

    async fn update(
        &self,
        filter: &Document,
        update: &Document,
        upsert: bool,
    ) -> Result<u64, DataSourceError> {
        let collection = self.collection().await?;
        let filter = Self::to_bson(filter)?;
        let update = bson::doc! { "$set": Self::to_bson(update)? };

        let result = self
            .retry
            .run("mongodb update_many", || {
                let collection = collection.clone();
                let filter = filter.clone();
                let update = update.clone();
                async move {
                    collection
                        .update_many(filter, update)
                        .upsert(upsert)
                        .await
                        .map_err(|e| DataSourceError::Query(e.to_string()))
                }
            })
            .await?;

        Ok(result.modified_count)
    }

    async fn delete(&self, filter: &Document) -> Result<u64, DataSourceError> {
        let collection = self.collection().await?;
        let filter = Self::to_bson(filter)?;

        let result = self
            .retry
            .run("mongodb delete_many", || {
                let collection = collection.clone();
                let filter = filter.clone();
                async move {
                    collection
                        .delete_many(filter)
                        .await
                        .map_err(|e| DataSourceError::Query(e.to_string()))
                }
            })
            .await?;

        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, Value)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_json_bson_round_trip() {
        let original = doc(&[
            ("name", json!("report")),
            ("size", json!(42)),
            ("tags", json!(["a", "b"])),
        ]);

        let bson_doc = MongoStore::to_bson(&original).unwrap();
        let back = MongoStore::to_json(bson_doc).unwrap();
        assert_eq!(back["name"], json!("report"));
        assert_eq!(back["size"], json!(42));
        assert_eq!(back["tags"], json!(["a", "b"]));
    }

    // Integration test (requires a running MongoDB, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_crud_against_local_mongo() {
        let store = MongoStore::new(MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "testdb".to_string(),
            collection: "mcp_test".to_string(),
        });

        let entry = doc(&[("name", json!("alpha")), ("count", json!(1))]);
        store.write(&entry).await.unwrap();

        let found = store.read(&doc(&[("name", json!("alpha"))])).await.unwrap();
        assert!(!found.is_empty());

        let modified = store
            .update(
                &doc(&[("name", json!("alpha"))]),
                &doc(&[("count", json!(2))]),
                false,
            )
            .await
            .unwrap();
        assert!(modified >= 1);

        let deleted = store
            .delete(&doc(&[("name", json!("alpha"))]))
            .await
            .unwrap();
        assert!(deleted >= 1);
    }
}
