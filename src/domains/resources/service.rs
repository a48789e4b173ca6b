//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! It maintains a registry of available resources and handles read requests.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::context::AppContext;
use crate::core::config::Config;

/// Service for managing and accessing resources.
///
/// This service maintains a registry of available resources and handles
/// resource listing and reading operations.
pub struct ResourceService {
    /// Server configuration, consulted by dynamic resources.
    config: Arc<Config>,

    /// Shared context, consulted by dynamic resources.
    context: Arc<AppContext>,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata
    resources: HashMap<String, ResourceEntry>,

    /// Resource templates for parameterized resources.
    templates: Vec<ResourceTemplate>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Dynamic content that requires computation.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone)]
pub enum DynamicResourceType {
    /// Server information resource.
    ServerInfo,

    /// Ollama runtime availability and model list.
    ChatStatus,
}

impl ResourceService {
    /// Create a new ResourceService.
    pub fn new(config: Arc<Config>, context: Arc<AppContext>) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            config,
            context,
            resources: HashMap::new(),
            templates: Vec::new(),
        };

        // Register all resources and templates from registry
        service.register_from_registry();
        service.register_templates_from_registry();

        service
    }

    /// Register all resources from the registry.
    fn register_from_registry(&mut self) {
        info!("Registering resources from registry");
        for entry in get_all_resources() {
            self.register_resource(entry);
        }
    }

    /// Register all resource templates from the registry.
    fn register_templates_from_registry(&mut self) {
        info!("Registering resource templates from registry");
        self.templates = get_all_resource_templates();
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let content = match &entry.content {
            ResourceContent::Text(text) => ResourceContents::text(text, uri),
            ResourceContent::Dynamic(dynamic_type) => {
                self.resolve_dynamic_content(uri, dynamic_type).await?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Resolve dynamic resource content.
    async fn resolve_dynamic_content(
        &self,
        uri: &str,
        dynamic_type: &DynamicResourceType,
    ) -> Result<ResourceContents, ResourceError> {
        match dynamic_type {
            DynamicResourceType::ServerInfo => {
                let info = serde_json::json!({
                    "server": self.config.server.name,
                    "version": self.config.server.version,
                    "transport": self.config.transport.description(),
                    "ollama": {
                        "base_url": self.config.ollama.base_url,
                        "default_model": self.config.ollama.default_model,
                    },
                    "backends": {
                        "redis": self.config.backends.redis.is_some(),
                        "mongodb": self.config.backends.mongo.is_some(),
                        "postgres": self.config.backends.postgres.is_some(),
                        "s3": self.config.backends.s3.is_some(),
                        "local_storage": self.config.backends.storage_root.is_some(),
                    },
                });

                Ok(ResourceContents::text(
                    serde_json::to_string_pretty(&info)
                        .map_err(|e| ResourceError::internal(e.to_string()))?,
                    uri,
                ))
            }
            DynamicResourceType::ChatStatus => {
                let available = self.context.ollama.is_available().await;
                let models = if available {
                    self.context.ollama.list_models().await.unwrap_or_default()
                } else {
                    Vec::new()
                };

                let status = serde_json::json!({
                    "base_url": self.config.ollama.base_url,
                    "available": available,
                    "default_model": self.config.ollama.default_model,
                    "models": models,
                });

                Ok(ResourceContents::text(
                    serde_json::to_string_pretty(&status)
                        .map_err(|e| ResourceError::internal(e.to_string()))?,
                    uri,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> ResourceService {
        let config = Arc::new(Config::default());
        let context = AppContext::new(&config);
        ResourceService::new(config, context)
    }

    #[tokio::test]
    async fn test_resource_service_creation() {
        let service = test_service();
        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 4);
    }

    #[tokio::test]
    async fn test_read_static_resource() {
        let service = test_service();
        let result = service.read_resource("resource://chat/help").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_read_server_info() {
        let service = test_service();
        let result = service.read_resource("mcp://server/info").await.unwrap();
        let ResourceContents::TextResourceContents { text, .. } = &result.contents[0] else {
            panic!("Expected text contents");
        };
        let info: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(info["backends"]["redis"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = test_service();
        let result = service.read_resource("resource://nope").await;
        assert!(result.is_err());
    }
}
