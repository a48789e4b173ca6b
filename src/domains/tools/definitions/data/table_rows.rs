//! Table rows tool definition.
//!
//! Elementary select/insert/delete against the configured PostgreSQL
//! table. Filters are equality predicates over column values.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::context::AppContext;
use crate::domains::tools::definitions::common::{
    error_result, structured_result, success_result, to_document,
};

/// Table action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableAction {
    /// Select rows matching the filter.
    Select,

    /// Insert a new row.
    Insert,

    /// Delete rows matching the filter.
    Delete,
}

/// Parameters for the table rows tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableRowsParams {
    /// Action: "select", "insert", or "delete".
    pub action: TableAction,

    /// Equality filter over column values, as a JSON object.
    #[serde(default)]
    pub filter: Option<Value>,

    /// Row values for insert, as a JSON object.
    #[serde(default)]
    pub row: Option<Value>,
}

/// Table rows tool - PostgreSQL-backed select/insert/delete.
pub struct TableRowsTool;

impl TableRowsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "table_rows";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Select, insert, or delete rows in the PostgreSQL table using equality filters.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(action = ?params.action))]
    pub async fn execute(params: &TableRowsParams, context: &AppContext) -> CallToolResult {
        info!("Table rows tool called");

        let store = match context.postgres() {
            Ok(store) => store,
            Err(e) => return error_result(&e.to_string()),
        };

        match params.action {
            TableAction::Select => {
                let filter = match to_document(&params.filter) {
                    Ok(filter) => filter,
                    Err(e) => return error_result(&format!("Invalid filter: {}", e)),
                };
                match store.read(&filter).await {
                    Ok(rows) => structured_result(
                        &format!("Selected {} row(s)", rows.len()),
                        &Value::Array(rows.into_iter().map(Value::Object).collect()),
                    ),
                    Err(e) => error_result(&format!("Select failed: {}", e)),
                }
            }
            TableAction::Insert => {
                let row = match to_document(&params.row) {
                    Ok(row) if !row.is_empty() => row,
                    Ok(_) => return error_result("Missing 'row' for insert"),
                    Err(e) => return error_result(&format!("Invalid row: {}", e)),
                };
                match store.write(&row).await {
                    Ok(()) => success_result("Inserted 1 row".to_string()),
                    Err(e) => error_result(&format!("Insert failed: {}", e)),
                }
            }
            TableAction::Delete => {
                let filter = match to_document(&params.filter) {
                    Ok(filter) => filter,
                    Err(e) => return error_result(&format!("Invalid filter: {}", e)),
                };
                match store.delete(&filter).await {
                    Ok(count) => success_result(format!("Deleted {} row(s)", count)),
                    Err(e) => error_result(&format!("Delete failed: {}", e)),
                }
            }
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: TableRowsParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<TableRowsParams>(),
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
                let params: TableRowsParams =
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
        let params = TableRowsParams {
            action: TableAction::Select,
            filter: Some(serde_json::json!({ "id": 1 })),
            row: None,
        };
        let result = TableRowsTool::execute(&params, &context).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_action_deserializes_lowercase() {
        let params: TableRowsParams = serde_json::from_value(serde_json::json!({
            "action": "insert",
            "row": { "name": "alpha" }
        }))
        .unwrap();
        assert_eq!(params.action, TableAction::Insert);
    }
}
