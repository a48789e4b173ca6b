//! Text composition tool definition.
//!
//! Four generation modes behind one tool: completing a fragment, writing
//! about a topic, paraphrasing, and following a raw instruction.

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

/// Composition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComposeMode {
    /// Continue an unfinished text.
    Complete,

    /// Write a short text about a topic.
    Generate,

    /// Rewrite a text while keeping its meaning.
    Paraphrase,

    /// Pass the text to the model verbatim as an instruction.
    Instruction,
}

/// Parameters for the compose tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatComposeParams {
    /// The fragment, topic, text, or instruction, depending on the mode.
    pub text: String,

    /// Composition mode: "complete", "generate", "paraphrase", or "instruction".
    pub mode: ComposeMode,

    /// Model override; the configured default is used when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// Compose tool - produces new text from a fragment, topic, or instruction.
pub struct ChatComposeTool;

impl ChatComposeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "chat_compose";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Compose text: complete a fragment, write about a topic, paraphrase, or follow an instruction.";

    /// Build the generation prompt for the requested mode.
    fn build_prompt(text: &str, mode: ComposeMode) -> String {
        match mode {
            ComposeMode::Complete => {
                format!("Complete the following text:\n\n{}", text)
            }
            ComposeMode::Generate => {
                format!("Write a short text about the following topic:\n\n{}", text)
            }
            ComposeMode::Paraphrase => format!(
                "Paraphrase the following text, keeping its meaning:\n\n{}",
                text
            ),
            ComposeMode::Instruction => text.to_string(),
        }
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(mode = ?params.mode))]
    pub async fn execute(params: &ChatComposeParams, context: &AppContext) -> CallToolResult {
        info!("Compose tool called");

        let prompt = Self::build_prompt(&params.text, params.mode);
        let model = context.ollama.resolve_model(params.model.as_deref());
        match context.ollama.generate(&prompt, model).await {
            Ok(text) => success_result(text),
            Err(e) => error_result(&format!("Composition failed: {}", e)),
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: ChatComposeParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<ChatComposeParams>(),
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
                let params: ChatComposeParams =
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
    fn test_prompts_per_mode() {
        assert!(
            ChatComposeTool::build_prompt("Once upon a", ComposeMode::Complete)
                .starts_with("Complete the following text")
        );
        assert!(
            ChatComposeTool::build_prompt("space travel", ComposeMode::Generate)
                .starts_with("Write a short text about")
        );
        assert!(
            ChatComposeTool::build_prompt("old sentence", ComposeMode::Paraphrase)
                .starts_with("Paraphrase the following text")
        );
    }

    #[test]
    fn test_instruction_mode_passes_text_verbatim() {
        let prompt =
            ChatComposeTool::build_prompt("List three rivers in Europe", ComposeMode::Instruction);
        assert_eq!(prompt, "List three rivers in Europe");
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let params: ChatComposeParams = serde_json::from_value(serde_json::json!({
            "text": "x",
            "mode": "paraphrase"
        }))
        .unwrap();
        assert_eq!(params.mode, ComposeMode::Paraphrase);
    }
}
