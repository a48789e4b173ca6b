//! Code assistance tool definition.
//!
//! Five actions over a code snippet: fix, explain, tests, debug, and
//! docstring.

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

/// Assistance action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssistAction {
    /// Correct bugs and return the fixed code.
    Fix,

    /// Explain what the code does.
    Explain,

    /// Write unit tests for the code.
    Tests,

    /// Point out likely bugs and issues.
    Debug,

    /// Write documentation comments for the code.
    Docstring,
}

/// Parameters for the code assistance tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CodeAssistParams {
    /// The code snippet to work on.
    pub code: String,

    /// Action: "fix", "explain", "tests", "debug", or "docstring".
    pub action: AssistAction,

    /// Model override; the configured default is used when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// Code assistance tool - fixes, explains, tests, debugs, or documents code.
pub struct CodeAssistTool;

impl CodeAssistTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "code_assist";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Assist with a code snippet: fix bugs, explain it, write tests, debug it, or write docstrings.";

    /// Build the generation prompt for the requested action.
    fn build_prompt(code: &str, action: AssistAction) -> String {
        let instruction = match action {
            AssistAction::Fix => {
                "Fix the bugs in the following code and return the corrected code:"
            }
            AssistAction::Explain => "Explain what the following code does:",
            AssistAction::Tests => "Write unit tests for the following code:",
            AssistAction::Debug => "Identify likely bugs or issues in the following code:",
            AssistAction::Docstring => {
                "Write documentation comments for the following code and return it with them added:"
            }
        };
        format!("{}\n\n{}", instruction, code)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(action = ?params.action))]
    pub async fn execute(params: &CodeAssistParams, context: &AppContext) -> CallToolResult {
        info!("Code assistance tool called");

        let prompt = Self::build_prompt(&params.code, params.action);
        let model = context.ollama.resolve_model(params.model.as_deref());
        match context.ollama.generate(&prompt, model).await {
            Ok(answer) => success_result(answer),
            Err(e) => error_result(&format!("Code assistance failed: {}", e)),
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: CodeAssistParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<CodeAssistParams>(),
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
                let params: CodeAssistParams =
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
    fn test_prompts_per_action() {
        let code = "fn main() {}";
        assert!(CodeAssistTool::build_prompt(code, AssistAction::Fix).starts_with("Fix the bugs"));
        assert!(
            CodeAssistTool::build_prompt(code, AssistAction::Explain).starts_with("Explain what")
        );
        assert!(
            CodeAssistTool::build_prompt(code, AssistAction::Tests).starts_with("Write unit tests")
        );
        assert!(
            CodeAssistTool::build_prompt(code, AssistAction::Debug).starts_with("Identify likely")
        );
        assert!(
            CodeAssistTool::build_prompt(code, AssistAction::Docstring)
                .starts_with("Write documentation comments")
        );
    }

    #[test]
    fn test_action_deserializes_lowercase() {
        let params: CodeAssistParams = serde_json::from_value(serde_json::json!({
            "code": "x = 1",
            "action": "docstring"
        }))
        .unwrap();
        assert_eq!(params.action, AssistAction::Docstring);
    }
}
