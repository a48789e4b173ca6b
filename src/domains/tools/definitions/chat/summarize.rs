//! Summarization tool definition.

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

/// Parameters for the summarize tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatSummarizeParams {
    /// The text to summarize.
    pub text: String,

    /// Maximum number of sentences in the summary.
    #[serde(default)]
    pub max_sentences: Option<u32>,

    /// Model override; the configured default is used when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// Summarize tool - condenses a text into a few sentences.
pub struct ChatSummarizeTool;

impl ChatSummarizeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "chat_summarize";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Summarize a text in a few sentences using the local language model.";

    fn build_prompt(text: &str, max_sentences: Option<u32>) -> String {
        match max_sentences {
            Some(n) => format!(
                "Summarize the following text in at most {} sentences:\n\n{}",
                n, text
            ),
            None => format!("Summarize the following text in a few sentences:\n\n{}", text),
        }
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(params: &ChatSummarizeParams, context: &AppContext) -> CallToolResult {
        info!("Summarize tool called ({} chars)", params.text.len());

        let prompt = Self::build_prompt(&params.text, params.max_sentences);
        let model = context.ollama.resolve_model(params.model.as_deref());
        match context.ollama.generate(&prompt, model).await {
            Ok(summary) => success_result(summary),
            Err(e) => error_result(&format!("Summarization failed: {}", e)),
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: ChatSummarizeParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<ChatSummarizeParams>(),
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
                let params: ChatSummarizeParams =
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
    fn test_prompt_wraps_text() {
        let prompt = ChatSummarizeTool::build_prompt("A long article.", None);
        assert!(prompt.starts_with("Summarize the following text"));
        assert!(prompt.ends_with("A long article."));
    }

    #[test]
    fn test_prompt_honors_sentence_limit() {
        let prompt = ChatSummarizeTool::build_prompt("A long article.", Some(2));
        assert!(prompt.contains("at most 2 sentences"));
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = ChatSummarizeTool::to_tool();
        assert_eq!(tool.name, "chat_summarize");
    }
}
