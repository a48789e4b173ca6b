//! Document store tool definition.
//!
//! Elementary find/insert/update/delete against the configured MongoDB
//! collection. Filters and documents are free-form JSON objects.

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
use crate::domains::tools::definitions::common::{
    error_result, structured_result, success_result, to_document,
};

/// Document store action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentAction {
    /// Find documents matching the filter.
    Find,

    /// Insert a new document.
    Insert,

    /// Update documents matching the filter.
    Update,

    /// Delete documents matching the filter.
    Delete,
}

/// Parameters for the document store tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentStoreParams {
    /// Action: "find", "insert", "update", or "delete".
    pub action: DocumentAction,

    /// Query filter as a JSON object. An empty filter matches everything.
    #[serde(default)]
    pub filter: Option<Value>,

    /// Document to insert, or fields to set on update.
    #[serde(default)]
    pub document: Option<Value>,

    /// Insert the update document when nothing matches.
    #[serde(default)]
    pub upsert: bool,
}

/// Document store tool - MongoDB-backed CRUD.
pub struct DocumentStoreTool;

impl DocumentStoreTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "document_store";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Find, insert, update, or delete JSON documents in the MongoDB collection.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(action = ?params.action))]
    pub async fn execute(params: &DocumentStoreParams, context: &AppContext) -> CallToolResult {
        info!("Document store tool called");

        let store = match context.mongo() {
            Ok(store) => store,
            Err(e) => return error_result(&e.to_string()),
        };

        let filter = match to_document(&params.filter) {
            Ok(filter) => filter,
            Err(e) => return error_result(&format!("Invalid filter: {}", e)),
        };

        match params.action {
            DocumentAction::Find => match store.read(&filter).await {
                Ok(docs) => structured_result(
                    &format!("Found {} document(s)", docs.len()),
                    &Value::Array(docs.into_iter().map(Value::Object).collect()),
                ),
                Err(e) => error_result(&format!("Find failed: {}", e)),
            },
            DocumentAction::Insert => {
                let document = match to_document(&params.document) {
                    Ok(doc) if !doc.is_empty() => doc,
                    Ok(_) => return error_result("Missing 'document' for insert"),
                    Err(e) => return error_result(&format!("Invalid document: {}", e)),
                };
                match store.write(&document).await {
                    Ok(()) => success_result("Inserted 1 document".to_string()),
                    Err(e) => error_result(&format!("Insert failed: {}", e)),
                }
            }
            DocumentAction::Update => {
                let update = match to_document(&params.document) {
                    Ok(doc) if !doc.is_empty() => doc,
                    Ok(_) => return error_result("Missing 'document' for update"),
                    Err(e) => return error_result(&format!("Invalid document: {}", e)),
                };
                match store.update(&filter, &update, params.upsert).await {
                    Ok(count) => structured_result(
                        "Update complete",
                        &json!({ "modified": count, "upsert": params.upsert }),
                    ),
                    Err(e) => error_result(&format!("Update failed: {}", e)),
                }
            }
            DocumentAction::Delete => match store.delete(&filter).await {
                Ok(count) => success_result(format!("Deleted {} document(s)", count)),
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
        let params: DocumentStoreParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<DocumentStoreParams>(),
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
                let params: DocumentStoreParams =
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
        let params = DocumentStoreParams {
            action: DocumentAction::Find,
            filter: None,
            document: None,
            upsert: false,
        };
        let result = DocumentStoreTool::execute(&params, &context).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_upsert_defaults_to_false() {
        let params: DocumentStoreParams = serde_json::from_value(serde_json::json!({
            "action": "update",
            "filter": { "name": "a" },
            "document": { "count": 2 }
        }))
        .unwrap();
        assert!(!params.upsert);
    }

    #[test]
    fn test_non_object_filter_is_rejected() {
        let params: DocumentStoreParams = serde_json::from_value(serde_json::json!({
            "action": "find",
            "filter": [1, 2, 3]
        }))
        .unwrap();
        assert!(to_document(&params.filter).is_err());
    }
}
