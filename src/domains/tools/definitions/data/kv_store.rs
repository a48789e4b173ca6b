//! Key/value store tool definition.
//!
//! Elementary get/set/delete against the configured Redis backend.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::context::AppContext;
use crate::data_sources::Document;
use crate::domains::tools::definitions::common::{error_result, structured_result, success_result};

/// Key/value action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum KvAction {
    /// Read the value for a key.
    Get,

    /// Set a key to a value.
    Set,

    /// Delete a key.
    Delete,
}

/// Parameters for the key/value store tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct KvStoreParams {
    /// Action: "get", "set", or "delete".
    pub action: KvAction,

    /// The key to operate on.
    pub key: String,

    /// Value to store. Required for "set"; non-string values are stored as
    /// their JSON text.
    #[serde(default)]
    pub value: Option<Value>,
}

/// Key/value store tool - Redis-backed get/set/delete.
pub struct KvStoreTool;

impl KvStoreTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "kv_store";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get, set, or delete a key in the Redis key/value store.";

    fn key_doc(key: &str) -> Document {
        let mut doc = Document::new();
        doc.insert("key".to_string(), Value::String(key.to_string()));
        doc
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(action = ?params.action, key = %params.key))]
    pub async fn execute(params: &KvStoreParams, context: &AppContext) -> CallToolResult {
        info!("Key/value store tool called");

        let store = match context.redis() {
            Ok(store) => store,
            Err(e) => return error_result(&e.to_string()),
        };

        match params.action {
            KvAction::Get => match store.read(&Self::key_doc(&params.key)).await {
                Ok(docs) => {
                    let value = docs
                        .first()
                        .and_then(|d| d.get("value"))
                        .cloned()
                        .unwrap_or(Value::Null);
                    structured_result(
                        &format!("Value for '{}'", params.key),
                        &json!({ "key": params.key, "value": value }),
                    )
                }
                Err(e) => error_result(&format!("Get failed: {}", e)),
            },
            KvAction::Set => {
                let Some(value) = &params.value else {
                    return error_result("Missing 'value' for set");
                };
                let mut doc = Self::key_doc(&params.key);
                doc.insert("value".to_string(), value.clone());
                match store.write(&doc).await {
                    Ok(()) => success_result(format!("Stored '{}'", params.key)),
                    Err(e) => error_result(&format!("Set failed: {}", e)),
                }
            }
            KvAction::Delete => match store.delete(&Self::key_doc(&params.key)).await {
                Ok(count) => success_result(format!("Deleted {} key(s)", count)),
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
        let params: KvStoreParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<KvStoreParams>(),
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
                let params: KvStoreParams =
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

    #[tokio::test]
    async fn test_unconfigured_backend_reports_tool_error() {
        let context = AppContext::new(&Config::default());
        let params = KvStoreParams {
            action: KvAction::Get,
            key: "k1".to_string(),
            value: None,
        };
        let result = KvStoreTool::execute(&params, &context).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_set_requires_value() {
        let context = AppContext::new(&Config::default());
        let params = KvStoreParams {
            action: KvAction::Set,
            key: "k1".to_string(),
            value: None,
        };
        let result = KvStoreTool::execute(&params, &context).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_action_deserializes_lowercase() {
        let params: KvStoreParams = serde_json::from_value(serde_json::json!({
            "action": "delete",
            "key": "stale"
        }))
        .unwrap();
        assert_eq!(params.action, KvAction::Delete);
    }
}
