//! S3 object backend.
//!
//! Operates on a single configured bucket. Keys are used verbatim; the
//! service trusts S3's own key semantics rather than applying local path
//! rules.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use tokio::sync::OnceCell;
use tracing::info;

use super::{DataSourceError, RetryPolicy, Storage};
use crate::core::config::S3Config;

/// S3-backed object store.
pub struct S3Storage {
    config: S3Config,
    client: OnceCell<aws_sdk_s3::Client>,
    retry: RetryPolicy,
}

impl S3Storage {
    /// Create a new store for the given bucket settings.
    pub fn new(config: S3Config) -> Self {
        Self {
            config,
            client: OnceCell::new(),
            retry: RetryPolicy::http(),
        }
    }

    /// Get (or lazily build) the S3 client from the ambient AWS environment.
    async fn client(&self) -> &aws_sdk_s3::Client {
        self.client
            .get_or_init(|| async {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(aws_config::Region::new(self.config.region.clone()))
                    .load()
                    .await;
                info!("Connected to S3, bucket '{}'", self.config.bucket);
                aws_sdk_s3::Client::new(&sdk_config)
            })
            .await
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload(&self, path: &str, data: &[u8]) -> Result<(), DataSourceError> {
        let client = self.client().await;

        self.retry
            .run("s3 put_object", || {
                let body = ByteStream::from(data.to_vec());
                async move {
                    client
                        .put_object()
                        .bucket(&self.config.bucket)
                        .key(path)
                        .body(body)
                        .send()
                        .await
                        .map(|_| ())
                        .map_err(|e| DataSourceError::Storage(e.to_string()))
                }
            })
            .await
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, DataSourceError> {
        let client = self.client().await;

        let output = self
            .retry
            .run("s3 get_object", || async {
                client
                    .get_object()
                    .bucket(&self.config.bucket)
                    .key(path)
                    .send()
                    .await
                    .map_err(|e| DataSourceError::Storage(e.to_string()))
            })
            .await?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| DataSourceError::Storage(e.to_string()))?;
        Ok(bytes.into_bytes().to_vec())
    }

    async fn delete(&self, path: &str) -> Result<(), DataSourceError> {
        let client = self.client().await;

        self.retry
            .run("s3 delete_object", || async {
                client
                    .delete_object()
                    .bucket(&self.config.bucket)
                    .key(path)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|e| DataSourceError::Storage(e.to_string()))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration test (requires AWS credentials and a writable bucket)
    #[ignore]
    #[tokio::test]
    async fn test_round_trip_against_s3() {
        let store = S3Storage::new(S3Config {
            bucket: "mcp-test-bucket".to_string(),
            region: "us-east-1".to_string(),
        });

        store.upload("tests/hello.txt", b"hello").await.unwrap();
        let data = store.download("tests/hello.txt").await.unwrap();
        assert_eq!(data, b"hello");
        store.delete("tests/hello.txt").await.unwrap();
    }
}
