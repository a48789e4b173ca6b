//! Conversation recap tool definition.
//!
//! Deterministic: returns the tail of a conversation, newest last. The
//! model-backed summary lives in `chat_summarize`; this tool is the cheap
//! variant for clients that just need recent context.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{error_result, success_result};

/// How many trailing messages the recap keeps.
const RECAP_WINDOW: usize = 5;

/// Parameters for the recap tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatRecapParams {
    /// Conversation messages, oldest first.
    pub messages: Vec<String>,
}

/// Recap tool - returns the last few messages of a conversation.
pub struct ChatRecapTool;

impl ChatRecapTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "chat_recap";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Recap a conversation by returning its last five messages.";

    fn build_recap(messages: &[String]) -> String {
        let start = messages.len().saturating_sub(RECAP_WINDOW);
        messages[start..].join("\n")
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(count = params.messages.len()))]
    pub fn execute(params: &ChatRecapParams) -> CallToolResult {
        info!("Recap tool called");

        if params.messages.is_empty() {
            return error_result("No messages to recap");
        }
        success_result(Self::build_recap(&params.messages))
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: ChatRecapParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<ChatRecapParams>(),
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
                let params: ChatRecapParams =
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

    fn messages(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("message {}", i)).collect()
    }

    #[test]
    fn test_recap_keeps_last_five() {
        let recap = ChatRecapTool::build_recap(&messages(8));
        assert_eq!(
            recap,
            "message 4\nmessage 5\nmessage 6\nmessage 7\nmessage 8"
        );
    }

    #[test]
    fn test_recap_short_conversation() {
        let recap = ChatRecapTool::build_recap(&messages(2));
        assert_eq!(recap, "message 1\nmessage 2");
    }

    #[test]
    fn test_empty_conversation_is_an_error() {
        let result = ChatRecapTool::execute(&ChatRecapParams { messages: vec![] });
        assert!(result.is_error.unwrap_or(false));
    }
}
