//! Translation tool definition.
//!
//! Translates text to a target language, Spanish when none is given.

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

pub(crate) fn default_language() -> String {
    "Spanish".to_string()
}

/// Parameters for the translate tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChatTranslateParams {
    /// The text to translate.
    pub text: String,

    /// Target language, e.g. "French". Defaults to Spanish.
    #[serde(default = "default_language")]
    pub language: String,

    /// Model override; the configured default is used when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// Translate tool - renders a text in another language.
pub struct ChatTranslateTool;

impl ChatTranslateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "chat_translate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Translate a text to a target language (Spanish by default) using the local language model.";

    fn build_prompt(text: &str, language: &str) -> String {
        format!("Translate the following text to {}:\n\n{}", language, text)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(language = %params.language))]
    pub async fn execute(params: &ChatTranslateParams, context: &AppContext) -> CallToolResult {
        info!("Translate tool called");

        let prompt = Self::build_prompt(&params.text, &params.language);
        let model = context.ollama.resolve_model(params.model.as_deref());
        match context.ollama.generate(&prompt, model).await {
            Ok(translation) => success_result(translation),
            Err(e) => error_result(&format!("Translation failed: {}", e)),
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: ChatTranslateParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<ChatTranslateParams>(),
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
                let params: ChatTranslateParams =
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
    fn test_language_defaults_to_spanish() {
        let params: ChatTranslateParams =
            serde_json::from_value(serde_json::json!({ "text": "hello" })).unwrap();
        assert_eq!(params.language, "Spanish");
    }

    #[test]
    fn test_prompt_names_target_language() {
        let prompt = ChatTranslateTool::build_prompt("good morning", "French");
        assert!(prompt.starts_with("Translate the following text to French:"));
        assert!(prompt.ends_with("good morning"));
    }
}
