//! Text classification tool definition.
//!
//! Two classification flavors behind one tool: topic labeling and
//! sentiment analysis.

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

/// Classification flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassifyKind {
    /// Label the main topic of the text.
    Topic,

    /// Judge the sentiment of the text.
    Sentiment,
}

/// Parameters for the classify tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatClassifyParams {
    /// The text to classify.
    pub text: String,

    /// Classification flavor: "topic" or "sentiment".
    pub kind: ClassifyKind,

    /// Model override; the configured default is used when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// Classify tool - labels the topic or sentiment of a text.
pub struct ChatClassifyTool;

impl ChatClassifyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "chat_classify";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Classify a text by topic or sentiment using the local language model.";

    /// Build the generation prompt for the requested flavor.
    fn build_prompt(text: &str, kind: ClassifyKind) -> String {
        match kind {
            ClassifyKind::Topic => format!(
                "Classify the main topic of the following text in a single word or short phrase:\n\n{}",
                text
            ),
            ClassifyKind::Sentiment => format!(
                "Analyze the sentiment of the following text. Answer with positive, negative, or neutral, followed by a one-sentence justification:\n\n{}",
                text
            ),
        }
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(kind = ?params.kind))]
    pub async fn execute(params: &ChatClassifyParams, context: &AppContext) -> CallToolResult {
        info!("Classify tool called");

        let prompt = Self::build_prompt(&params.text, params.kind);
        let model = context.ollama.resolve_model(params.model.as_deref());
        match context.ollama.generate(&prompt, model).await {
            Ok(label) => success_result(label),
            Err(e) => error_result(&format!("Classification failed: {}", e)),
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: ChatClassifyParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<ChatClassifyParams>(),
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
                let params: ChatClassifyParams =
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
    fn test_topic_prompt_wraps_text() {
        let prompt = ChatClassifyTool::build_prompt("Rust 1.80 released", ClassifyKind::Topic);
        assert!(prompt.starts_with("Classify the main topic"));
        assert!(prompt.ends_with("Rust 1.80 released"));
    }

    #[test]
    fn test_sentiment_prompt_names_labels() {
        let prompt = ChatClassifyTool::build_prompt("I love this", ClassifyKind::Sentiment);
        assert!(prompt.contains("positive, negative, or neutral"));
        assert!(prompt.ends_with("I love this"));
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        let params: ChatClassifyParams = serde_json::from_value(serde_json::json!({
            "text": "x",
            "kind": "sentiment"
        }))
        .unwrap();
        assert_eq!(params.kind, ClassifyKind::Sentiment);

        let invalid = serde_json::from_value::<ChatClassifyParams>(serde_json::json!({
            "text": "x",
            "kind": "mood"
        }));
        assert!(invalid.is_err());
    }
}
