//! Code generation tool definition.
//!
//! Prefixes the task description with a per-language instruction so the
//! model answers with code in the requested language. The language map is
//! also exposed as a resource for clients that want to inspect it.

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

/// Per-language instruction preambles.
pub const LANGUAGE_PREAMBLES: &[(&str, &str)] = &[
    ("python", "Write Python code for the following task. Respond with code only, no explanations:"),
    ("javascript", "Write JavaScript code for the following task. Respond with code only, no explanations:"),
    ("typescript", "Write TypeScript code for the following task. Respond with code only, no explanations:"),
    ("bash", "Write a Bash script for the following task. Respond with code only, no explanations:"),
    ("go", "Write Go code for the following task. Respond with code only, no explanations:"),
];

/// Fallback instruction when the language is not in the map.
const GENERIC_PREAMBLE: &str =
    "Write code for the following task. Respond with code only, no explanations:";

pub(crate) fn default_language() -> String {
    "python".to_string()
}

/// Parameters for the code generation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CodeGenerateParams {
    /// Description of the code to write.
    pub prompt: String,

    /// Target language. Defaults to Python.
    #[serde(default = "default_language")]
    pub language: String,

    /// Model override; the configured default is used when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// Code generation tool - writes code for a described task.
pub struct CodeGenerateTool;

impl CodeGenerateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "code_generate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Generate code in a target language (python, javascript, typescript, bash, go) from a task description.";

    /// Instruction preamble for a language, falling back to the generic one.
    pub fn preamble(language: &str) -> &'static str {
        let language = language.to_lowercase();
        LANGUAGE_PREAMBLES
            .iter()
            .find(|(name, _)| *name == language)
            .map(|(_, preamble)| *preamble)
            .unwrap_or(GENERIC_PREAMBLE)
    }

    fn build_prompt(task: &str, language: &str) -> String {
        format!("{}\n\n{}", Self::preamble(language), task)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(language = %params.language))]
    pub async fn execute(params: &CodeGenerateParams, context: &AppContext) -> CallToolResult {
        info!("Code generation tool called");

        let prompt = Self::build_prompt(&params.prompt, &params.language);
        let model = context.ollama.resolve_model(params.model.as_deref());
        match context.ollama.generate(&prompt, model).await {
            Ok(code) => success_result(code),
            Err(e) => error_result(&format!("Code generation failed: {}", e)),
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: CodeGenerateParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<CodeGenerateParams>(),
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
                let params: CodeGenerateParams =
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
    fn test_preamble_known_languages() {
        assert!(CodeGenerateTool::preamble("python").contains("Python"));
        assert!(CodeGenerateTool::preamble("GO").contains("Go"));
        assert!(CodeGenerateTool::preamble("bash").contains("Bash"));
    }

    #[test]
    fn test_preamble_falls_back_for_unknown_language() {
        assert_eq!(CodeGenerateTool::preamble("cobol"), GENERIC_PREAMBLE);
    }

    #[test]
    fn test_prompt_contains_preamble_and_task() {
        let prompt = CodeGenerateTool::build_prompt("reverse a list", "typescript");
        assert!(prompt.starts_with("Write TypeScript code"));
        assert!(prompt.ends_with("reverse a list"));
    }

    #[test]
    fn test_language_defaults_to_python() {
        let params: CodeGenerateParams =
            serde_json::from_value(serde_json::json!({ "prompt": "sort" })).unwrap();
        assert_eq!(params.language, "python");
    }
}
