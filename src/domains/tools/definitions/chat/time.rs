//! Current-time tool definition.
//!
//! Deterministic: reports the server's local time so clients on other
//! machines (or models with no clock) can anchor themselves.

use chrono::Local;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::success_result;

/// Parameters for the time tool. Takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ChatTimeParams {}

/// Time tool - returns the current server time.
pub struct ChatTimeTool;

impl ChatTimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "chat_time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Return the current server time.";

    const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(_params: &ChatTimeParams) -> CallToolResult {
        info!("Time tool called");

        success_result(Local::now().format(Self::FORMAT).to_string())
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: ChatTimeParams = serde_json::from_value(arguments)
            .map_err(|e| format!("Invalid parameters: {}", e))?;

        let result = Self::execute(&params);
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
            input_schema: cached_schema_for_type::<ChatTimeParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: ChatTimeParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_execute_formats_a_timestamp() {
        let result = ChatTimeTool::execute(&ChatTimeParams::default());
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_params_accept_empty_object() {
        let params: ChatTimeParams = serde_json::from_value(serde_json::json!({})).unwrap();
        let result = ChatTimeTool::execute(&params);
        assert!(!result.is_error.unwrap_or(false));
    }
}
