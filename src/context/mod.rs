//! Shared application context.
//!
//! Owns the Ollama client, the optional storage backends, and the web
//! fetchers. Built once from the configuration and shared behind an `Arc`
//! by every tool, resource, and prompt.

use std::sync::Arc;

use tracing::info;

use crate::clients::OllamaClient;
use crate::core::config::Config;
use crate::data_sources::{
    ApiFetcher, Database, DataSourceError, GitHubFetcher, LocalStorage, MongoStore, PageFetcher,
    PostgresStore, RedisStore, S3Storage, Storage,
};

/// Everything a tool needs to run, wired from the configuration.
///
/// Backends without connection settings stay `None`; the accessor methods
/// turn that into a [`DataSourceError::NotConfigured`] so callers report a
/// tool-level error instead of panicking.
pub struct AppContext {
    /// Client for the local Ollama runtime.
    pub ollama: OllamaClient,

    /// JSON API fetcher.
    pub api_fetcher: ApiFetcher,

    /// Page title fetcher.
    pub page_fetcher: PageFetcher,

    /// GitHub repository fetcher.
    pub github_fetcher: GitHubFetcher,

    redis: Option<RedisStore>,
    mongo: Option<MongoStore>,
    postgres: Option<PostgresStore>,
    s3: Option<S3Storage>,
    local: Option<LocalStorage>,
}

impl AppContext {
    /// Build the context from the loaded configuration.
    pub fn new(config: &Config) -> Arc<Self> {
        let backends = &config.backends;

        let redis = backends
            .redis
            .as_ref()
            .map(|r| RedisStore::new(r.url.clone()));
        let mongo = backends.mongo.clone().map(MongoStore::new);
        let postgres = backends.postgres.clone().map(PostgresStore::new);
        let s3 = backends.s3.clone().map(S3Storage::new);
        let local = backends
            .storage_root
            .clone()
            .map(|root| LocalStorage::new(root, config.security.allow_symlinks));

        info!(
            "Context ready: ollama at {}, default model '{}'",
            config.ollama.base_url, config.ollama.default_model
        );

        Arc::new(Self {
            ollama: OllamaClient::new(config.ollama.clone()),
            api_fetcher: ApiFetcher::new(),
            page_fetcher: PageFetcher::new(),
            github_fetcher: GitHubFetcher::new(),
            redis,
            mongo,
            postgres,
            s3,
            local,
        })
    }

    /// The Redis key/value store, if configured.
    pub fn redis(&self) -> Result<&dyn Database, DataSourceError> {
        self.redis
            .as_ref()
            .map(|s| s as &dyn Database)
            .ok_or(DataSourceError::NotConfigured("redis"))
    }

    /// The MongoDB document store, if configured.
    pub fn mongo(&self) -> Result<&dyn Database, DataSourceError> {
        self.mongo
            .as_ref()
            .map(|s| s as &dyn Database)
            .ok_or(DataSourceError::NotConfigured("mongodb"))
    }

    /// The PostgreSQL row store, if configured.
    pub fn postgres(&self) -> Result<&dyn Database, DataSourceError> {
        self.postgres
            .as_ref()
            .map(|s| s as &dyn Database)
            .ok_or(DataSourceError::NotConfigured("postgres"))
    }

    /// The S3 object store, if configured.
    pub fn s3(&self) -> Result<&dyn Storage, DataSourceError> {
        self.s3
            .as_ref()
            .map(|s| s as &dyn Storage)
            .ok_or(DataSourceError::NotConfigured("s3"))
    }

    /// The local filesystem object store, if configured.
    pub fn local_storage(&self) -> Result<&dyn Storage, DataSourceError> {
        self.local
            .as_ref()
            .map(|s| s as &dyn Storage)
            .ok_or(DataSourceError::NotConfigured("local storage"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_backends_are_reported() {
        let context = AppContext::new(&Config::default());
        assert!(matches!(
            context.redis(),
            Err(DataSourceError::NotConfigured("redis"))
        ));
        assert!(matches!(
            context.mongo(),
            Err(DataSourceError::NotConfigured("mongodb"))
        ));
        assert!(matches!(
            context.postgres(),
            Err(DataSourceError::NotConfigured("postgres"))
        ));
        assert!(matches!(
            context.s3(),
            Err(DataSourceError::NotConfigured("s3"))
        ));
        assert!(matches!(
            context.local_storage(),
            Err(DataSourceError::NotConfigured("local storage"))
        ));
    }

    #[test]
    fn test_local_storage_enabled_by_root() {
        let mut config = Config::default();
        config.backends.storage_root = Some(std::env::temp_dir());
        let context = AppContext::new(&config);
        assert!(context.local_storage().is_ok());
    }
}
