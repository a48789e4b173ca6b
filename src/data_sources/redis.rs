//! Redis key/value backend.
//!
//! Documents are flat `{key, value}` pairs. Values are stored as strings;
//! non-string JSON values are serialized before writing.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::info;

use super::{Database, DataSourceError, Document, RetryPolicy};

/// Redis-backed key/value store.
///
/// The connection manager is created lazily on first use and reconnects
/// transparently afterwards.
pub struct RedisStore {
    url: String,
    conn: OnceCell<ConnectionManager>,
    retry: RetryPolicy,
}

impl RedisStore {
    /// Create a new store for the given connection URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            conn: OnceCell::new(),
            retry: RetryPolicy::database(),
        }
    }

    /// Get (or lazily establish) the shared connection.
    async fn connection(&self) -> Result<ConnectionManager, DataSourceError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let client = redis::Client::open(self.url.as_str())
                    .map_err(|e| DataSourceError::Connection(e.to_string()))?;
                let manager = ConnectionManager::new(client)
                    .await
                    .map_err(|e| DataSourceError::Connection(e.to_string()))?;
                info!("Connected to Redis: {}", self.url);
                Ok::<_, DataSourceError>(manager)
            })
            .await?;
        Ok(conn.clone())
    }

    fn key_of(doc: &Document) -> Result<&str, DataSourceError> {
        doc.get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| DataSourceError::InvalidDocument("missing 'key' field".to_string()))
    }

    fn value_of(doc: &Document) -> Result<String, DataSourceError> {
        let value = doc
            .get("value")
            .ok_or_else(|| DataSourceError::InvalidDocument("missing 'value' field".to_string()))?;
        Ok(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[async_trait]
impl Database for RedisStore {
    async fn read(&self, filter: &Document) -> Result<Vec<Document>, DataSourceError> {
        let key = Self::key_of(filter)?;
        let conn = self.connection().await?;

        let value: Option<String> = self
            .retry
            .run("redis GET", || {
                let mut conn = conn.clone();
                async move {
                    conn.get(key)
                        .await
                        .map_err(|e: redis::RedisError| DataSourceError::Query(e.to_string()))
                }
            })
            .await?;

        let mut doc = Document::new();
        doc.insert("key".to_string(), Value::String(key.to_string()));
        doc.insert(
            "value".to_string(),
            value.map(Value::String).unwrap_or(Value::Null),
        );
        Ok(vec![doc])
    }

    async fn write(&self, document: &Document) -> Result<(), DataSourceError> {
        let key = Self::key_of(document)?;
        let value = Self::value_of(document)?;
        let conn = self.connection().await?;

        self.retry
            .run("redis SET", || {
                let mut conn = conn.clone();
                let value = value.clone();
                async move {
                    conn.set::<_, _, ()>(key, value)
                        .await
                        .map_err(|e: redis::RedisError| DataSourceError::Query(e.to_string()))
                }
            })
            .await
    }

    async fn update(
        &self,
        filter: &Document,
        update: &Document,
        _upsert: bool,
    ) -> Result<u64, DataSourceError> {
        // SET is already an upsert; the flag is meaningless for Redis
        let key = Self::key_of(filter)?;
        let value = Self::value_of(update)?;
        let conn = self.connection().await?;

        self.retry
            .run("redis SET", || {
                let mut conn = conn.clone();
                let value = value.clone();
                async move {
                    conn.set::<_, _, ()>(key, value)
                        .await
                        .map_err(|e: redis::RedisError| DataSourceError::Query(e.to_string()))
                }
            })
            .await?;
        Ok(1)
    }

    async fn delete(&self, filter: &Document) -> Result<u64, DataSourceError> {
        let key = Self::key_of(filter)?;
        let conn = self.connection().await?;

        self.retry
            .run("redis DEL", || {
                let mut conn = conn.clone();
                async move {
                    conn.del::<_, u64>(key)
                        .await
                        .map_err(|e: redis::RedisError| DataSourceError::Query(e.to_string()))
                }
            })
            .await
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
    fn test_key_of_requires_string_key() {
        let missing = doc(&[("value", json!("v"))]);
        assert!(RedisStore::key_of(&missing).is_err());

        let numeric = doc(&[("key", json!(42))]);
        assert!(RedisStore::key_of(&numeric).is_err());

        let ok = doc(&[("key", json!("k1"))]);
        assert_eq!(RedisStore::key_of(&ok).unwrap(), "k1");
    }

    #[test]
    fn test_value_of_serializes_non_strings() {
        let string = doc(&[("value", json!("plain"))]);
        assert_eq!(RedisStore::value_of(&string).unwrap(), "plain");

        let object = doc(&[("value", json!({"a": 1}))]);
        assert_eq!(RedisStore::value_of(&object).unwrap(), r#"{"a":1}"#);
    }

    // Integration tests (require a running Redis, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_round_trip_against_local_redis() {
        let store = RedisStore::new("redis://localhost:6379");
        let entry = doc(&[("key", json!("mcp:test")), ("value", json!("hello"))]);
        store.write(&entry).await.unwrap();

        let read = store
            .read(&doc(&[("key", json!("mcp:test"))]))
            .await
            .unwrap();
        assert_eq!(read[0]["value"], json!("hello"));

        let deleted = store
            .delete(&doc(&[("key", json!("mcp:test"))]))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
    }
}
