//! Object store tool definition.
//!
//! Upload/download/delete blobs against either the local filesystem root
//! or the S3 bucket. Content crosses the MCP boundary as base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::context::AppContext;
use crate::data_sources::{DataSourceError, Storage};
use crate::domains::tools::definitions::common::{
    error_result, structured_result, success_result,
};

/// Which object store to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ObjectBackend {
    /// Local filesystem under the configured storage root.
    Local,

    /// The configured S3 bucket.
    S3,
}

/// Object store action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ObjectAction {
    /// Store a blob.
    Upload,

    /// Retrieve a blob.
    Download,

    /// Remove a blob.
    Delete,
}

/// Parameters for the object store tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ObjectStoreParams {
    /// Backend: "local" or "s3".
    pub backend: ObjectBackend,

    /// Action: "upload", "download", or "delete".
    pub action: ObjectAction,

    /// Object path (local) or key (S3).
    pub path: String,

    /// Base64-encoded content. Required for "upload".
    #[serde(default)]
    pub content: Option<String>,
}

/// Object store tool - blob upload/download/delete.
pub struct ObjectStoreTool;

impl ObjectStoreTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "object_store";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Upload, download, or delete a blob in local storage or S3. Content is base64.";

    fn backend<'a>(
        params: &ObjectStoreParams,
        context: &'a AppContext,
    ) -> Result<&'a dyn Storage, DataSourceError> {
        match params.backend {
            ObjectBackend::Local => context.local_storage(),
            ObjectBackend::S3 => context.s3(),
        }
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(backend = ?params.backend, action = ?params.action, path = %params.path))]
    pub async fn execute(params: &ObjectStoreParams, context: &AppContext) -> CallToolResult {
        info!("Object store tool called");

        let store = match Self::backend(params, context) {
            Ok(store) => store,
            Err(e) => return error_result(&e.to_string()),
        };

        match params.action {
            ObjectAction::Upload => {
                let Some(content) = &params.content else {
                    return error_result("Missing 'content' for upload");
                };
                let data = match BASE64.decode(content) {
                    Ok(data) => data,
                    Err(e) => return error_result(&format!("Invalid base64 content: {}", e)),
                };
                match store.upload(&params.path, &data).await {
                    Ok(()) => success_result(format!(
                        "Uploaded {} bytes to '{}'",
                        data.len(),
                        params.path
                    )),
                    Err(e) => error_result(&format!("Upload failed: {}", e)),
                }
            }
            ObjectAction::Download => match store.download(&params.path).await {
                Ok(data) => structured_result(
                    &format!("Downloaded {} bytes from '{}'", data.len(), params.path),
                    &json!({
                        "path": params.path,
                        "size": data.len(),
                        "content": BASE64.encode(&data),
                    }),
                ),
                Err(e) => error_result(&format!("Download failed: {}", e)),
            },
            ObjectAction::Delete => match store.delete(&params.path).await {
                Ok(()) => success_result(format!("Deleted '{}'", params.path)),
                Err(e) => error_result(&format!("Delete failed: {}", e)),
            },
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: ObjectStoreParams = serde_json::from_value(arguments)
            .map_err(|e| format!("Invalid parameters: {}", e))?;

        let result = Self::execute(&params, &context).await;
        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ObjectStoreParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(context: Arc<AppContext>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let context = context.clone();
            async move {
                let params: ObjectStoreParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &context).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use tempfile::TempDir;

    fn local_context(root: &std::path::Path) -> Arc<AppContext> {
        let mut config = Config::default();
        config.backends.storage_root = Some(root.to_path_buf());
        AppContext::new(&config)
    }

    #[tokio::test]
    async fn test_local_upload_download_delete() {
        let dir = TempDir::new().unwrap();
        let context = local_context(dir.path());

        let upload = ObjectStoreParams {
            backend: ObjectBackend::Local,
            action: ObjectAction::Upload,
            path: "notes/hello.txt".to_string(),
            content: Some(BASE64.encode(b"hello world")),
        };
        let result = ObjectStoreTool::execute(&upload, &context).await;
        assert!(!result.is_error.unwrap_or(false));

        let download = ObjectStoreParams {
            backend: ObjectBackend::Local,
            action: ObjectAction::Download,
            path: "notes/hello.txt".to_string(),
            content: None,
        };
        let result = ObjectStoreTool::execute(&download, &context).await;
        assert!(!result.is_error.unwrap_or(false));
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.contains(&BASE64.encode(b"hello world")));

        let delete = ObjectStoreParams {
            backend: ObjectBackend::Local,
            action: ObjectAction::Delete,
            path: "notes/hello.txt".to_string(),
            content: None,
        };
        let result = ObjectStoreTool::execute(&delete, &context).await;
        assert!(!result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_base64() {
        let dir = TempDir::new().unwrap();
        let context = local_context(dir.path());

        let params = ObjectStoreParams {
            backend: ObjectBackend::Local,
            action: ObjectAction::Upload,
            path: "x.bin".to_string(),
            content: Some("not base64!!!".to_string()),
        };
        let result = ObjectStoreTool::execute(&params, &context).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_s3_unconfigured_reports_tool_error() {
        let context = AppContext::new(&Config::default());
        let params = ObjectStoreParams {
            backend: ObjectBackend::S3,
            action: ObjectAction::Download,
            path: "x".to_string(),
            content: None,
        };
        let result = ObjectStoreTool::execute(&params, &context).await;
        assert!(result.is_error.unwrap_or(false));
    }
}
