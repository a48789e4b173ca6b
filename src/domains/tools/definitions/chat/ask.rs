//! Question answering tool definition.
//!
//! Forwards a free-form question to the Ollama runtime and returns the
//! generated answer.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::context::AppContext;
use crate::domains::tools::definitions::common::{error_result, success_result};

/// Parameters for the ask tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatAskParams {
    /// The question to answer.
    pub question: String,

    /// Model override; the configured default is used when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// Ask tool - answers a free-form question.
pub struct ChatAskTool;

impl ChatAskTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "chat_ask";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Answer a free-form question using the local language model.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(params: &ChatAskParams, context: &AppContext) -> CallToolResult {
        info!("Ask tool called");

        let model = context.ollama.resolve_model(params.model.as_deref());
        match context.ollama.generate(&params.question, model).await {
            Ok(answer) => success_result(answer),
            Err(e) => error_result(&format!("Generation failed: {}", e)),
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: ChatAskParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<ChatAskParams>(),
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
                let params: ChatAskParams =
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

    #[test]
    fn test_to_tool_metadata() {
        let tool = ChatAskTool::to_tool();
        assert_eq!(tool.name, "chat_ask");
        assert!(tool.description.is_some());
    }

    #[test]
    fn test_params_model_defaults_to_none() {
        let params: ChatAskParams =
            serde_json::from_value(serde_json::json!({ "question": "What is Rust?" })).unwrap();
        assert_eq!(params.question, "What is Rust?");
        assert!(params.model.is_none());
    }
}
