//! Local filesystem object backend.
//!
//! Blobs live under a configured root directory. Every path is validated
//! before any filesystem call: uploads may create new files but never
//! escape the root, downloads and deletes require the file to exist
//! inside it.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{DataSourceError, RetryPolicy, Storage};
use crate::core::security::{resolve_within_root, validate_existing};

/// Filesystem-backed object store rooted at a single directory.
pub struct LocalStorage {
    root: PathBuf,
    allow_symlinks: bool,
    retry: RetryPolicy,
}

impl LocalStorage {
    /// Create a new store rooted at the given directory.
    pub fn new(root: PathBuf, allow_symlinks: bool) -> Self {
        Self {
            root,
            allow_symlinks,
            retry: RetryPolicy::local_fs(),
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, path: &str, data: &[u8]) -> Result<(), DataSourceError> {
        let target = resolve_within_root(path, &self.root)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DataSourceError::Storage(e.to_string()))?;
        }

        self.retry
            .run("local upload", || {
                let target = target.clone();
                async move {
                    fs::write(&target, data)
                        .await
                        .map_err(|e| DataSourceError::Storage(e.to_string()))
                }
            })
            .await
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, DataSourceError> {
        let target = validate_existing(path, &self.root, self.allow_symlinks)?;

        self.retry
            .run("local download", || {
                let target = target.clone();
                async move {
                    fs::read(&target)
                        .await
                        .map_err(|e| DataSourceError::Storage(e.to_string()))
                }
            })
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), DataSourceError> {
        let target = validate_existing(path, &self.root, self.allow_symlinks)?;

        self.retry
            .run("local delete", || {
                let target = target.clone();
                async move {
                    fs::remove_file(&target)
                        .await
                        .map_err(|e| DataSourceError::Storage(e.to_string()))
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_download_delete_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = LocalStorage::new(dir.path().to_path_buf(), true);

        store.upload("reports/q1.txt", b"revenue up").await.unwrap();
        let data = store.download("reports/q1.txt").await.unwrap();
        assert_eq!(data, b"revenue up");

        store.delete("reports/q1.txt").await.unwrap();
        assert!(store.download("reports/q1.txt").await.is_err());
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let store = LocalStorage::new(dir.path().to_path_buf(), true);

        let result = store.upload("../outside.txt", b"nope").await;
        assert!(matches!(result, Err(DataSourceError::PathSecurity(_))));
    }

    #[tokio::test]
    async fn test_download_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = LocalStorage::new(dir.path().to_path_buf(), true);

        assert!(store.download("never-written.bin").await.is_err());
    }
}
