//! Storage and fetcher backends.
//!
//! Two families of backends, mirrored by the CRUD tools:
//!
//! - [`Database`]: keyed document stores (Redis, MongoDB, PostgreSQL) that
//!   read, write, update, and delete JSON documents.
//! - [`Storage`]: byte-oriented object stores (local filesystem, S3) that
//!   upload, download, and delete blobs by path.
//!
//! Plus the web fetchers (JSON APIs, page titles, GitHub repositories).
//!
//! All backends connect lazily on first use and route their operations
//! through a shared [`retry::RetryPolicy`].

mod fetchers;
mod filesystem;
mod mongodb;
mod postgres;
mod redis;
pub mod retry;
mod s3;

use async_trait::async_trait;
use thiserror::Error;

pub use fetchers::{ApiFetcher, GitHubFetcher, PageFetcher};
pub use filesystem::LocalStorage;
pub use mongodb::MongoStore;
pub use postgres::PostgresStore;
pub use redis::RedisStore;
pub use retry::RetryPolicy;
pub use s3::S3Storage;

/// A JSON document, as exchanged with the database backends.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Errors from storage and fetcher backends.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The backend has no connection settings configured.
    #[error("Backend not configured: {0}")]
    NotConfigured(&'static str),

    /// Failed to establish or reuse a connection.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A query or command failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// The supplied document or filter is malformed for this backend.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The operation is not supported by this backend.
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    /// A storage (blob) operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Path validation rejected a storage key.
    #[error("Path security: {0}")]
    PathSecurity(#[from] crate::core::security::PathSecurityError),

    /// A web fetch failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

/// Keyed document store operations.
///
/// Implementations interpret the filter/document maps in backend-specific
/// ways: Redis uses the `key`/`value` fields, MongoDB treats them as query
/// and update documents, PostgreSQL as equality predicates and row values.
#[async_trait]
pub trait Database: Send + Sync {
    /// Read all documents matching the filter.
    async fn read(&self, filter: &Document) -> Result<Vec<Document>, DataSourceError>;

    /// Write a new document.
    async fn write(&self, document: &Document) -> Result<(), DataSourceError>;

    /// Update documents matching the filter; returns the modified count.
    async fn update(
        &self,
        filter: &Document,
        update: &Document,
        upsert: bool,
    ) -> Result<u64, DataSourceError>;

    /// Delete documents matching the filter; returns the deleted count.
    async fn delete(&self, filter: &Document) -> Result<u64, DataSourceError>;
}

/// Byte-oriented object store operations.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a blob at the given path, overwriting any existing object.
    async fn upload(&self, path: &str, data: &[u8]) -> Result<(), DataSourceError>;

    /// Retrieve the blob at the given path.
    async fn download(&self, path: &str) -> Result<Vec<u8>, DataSourceError>;

    /// Remove the blob at the given path.
    async fn delete(&self, path: &str) -> Result<(), DataSourceError>;
}
