//! Greeting tool definition.
//!
//! Purely deterministic: picks a salutation from the local time of day.

use chrono::{Local, Timelike};
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

/// Parameters for the greet tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatGreetParams {
    /// Name of the person to greet.
    pub name: String,
}

/// Greet tool - returns a time-of-day greeting.
pub struct ChatGreetTool;

impl ChatGreetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "chat_greet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Greet someone by name with a time-of-day salutation.";

    /// Salutation for a given hour (0-23). Anything before noon counts as
    /// morning, noon to 6 p.m. as afternoon, the rest as evening.
    fn salutation(hour: u32) -> &'static str {
        match hour {
            0..=11 => "Good morning",
            12..=17 => "Good afternoon",
            _ => "Good evening",
        }
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(params: &ChatGreetParams) -> CallToolResult {
        info!("Greet tool called");

        let greeting = format!(
            "{}, {}! How can I help you today?",
            Self::salutation(Local::now().hour()),
            params.name.trim()
        );
        success_result(greeting)
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: ChatGreetParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<ChatGreetParams>(),
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
                let params: ChatGreetParams =
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

    #[test]
    fn test_salutation_windows() {
        assert_eq!(ChatGreetTool::salutation(0), "Good morning");
        assert_eq!(ChatGreetTool::salutation(3), "Good morning");
        assert_eq!(ChatGreetTool::salutation(8), "Good morning");
        assert_eq!(ChatGreetTool::salutation(11), "Good morning");
        assert_eq!(ChatGreetTool::salutation(12), "Good afternoon");
        assert_eq!(ChatGreetTool::salutation(17), "Good afternoon");
        assert_eq!(ChatGreetTool::salutation(18), "Good evening");
        assert_eq!(ChatGreetTool::salutation(23), "Good evening");
    }

    #[test]
    fn test_execute_includes_name() {
        let result = ChatGreetTool::execute(&ChatGreetParams {
            name: " Ada ".to_string(),
        });
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.contains("Ada!"));
    }
}
