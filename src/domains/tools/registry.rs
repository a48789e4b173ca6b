//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::context::AppContext;

use super::definitions::{
    ChatAskTool, ChatClassifyTool, ChatComposeTool, ChatGreetTool, ChatRecapTool,
    ChatSummarizeTool, ChatTimeTool, ChatTranslateTool, CodeAssistTool, CodeGenerateTool,
    DocumentStoreTool, FinanceValuationTool, KvStoreTool, ObjectStoreTool, TableRowsTool,
    WebFetchTool,
};

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    context: Arc<AppContext>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ChatAskTool::NAME,
            ChatClassifyTool::NAME,
            ChatComposeTool::NAME,
            ChatGreetTool::NAME,
            ChatRecapTool::NAME,
            ChatSummarizeTool::NAME,
            ChatTimeTool::NAME,
            ChatTranslateTool::NAME,
            CodeAssistTool::NAME,
            CodeGenerateTool::NAME,
            DocumentStoreTool::NAME,
            FinanceValuationTool::NAME,
            KvStoreTool::NAME,
            ObjectStoreTool::NAME,
            TableRowsTool::NAME,
            WebFetchTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ChatAskTool::to_tool(),
            ChatClassifyTool::to_tool(),
            ChatComposeTool::to_tool(),
            ChatGreetTool::to_tool(),
            ChatRecapTool::to_tool(),
            ChatSummarizeTool::to_tool(),
            ChatTimeTool::to_tool(),
            ChatTranslateTool::to_tool(),
            CodeAssistTool::to_tool(),
            CodeGenerateTool::to_tool(),
            DocumentStoreTool::to_tool(),
            FinanceValuationTool::to_tool(),
            KvStoreTool::to_tool(),
            ObjectStoreTool::to_tool(),
            TableRowsTool::to_tool(),
            WebFetchTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let context = self.context.clone();
        match name {
            ChatAskTool::NAME => ChatAskTool::http_handler(arguments, context).await,
            ChatClassifyTool::NAME => ChatClassifyTool::http_handler(arguments, context).await,
            ChatComposeTool::NAME => ChatComposeTool::http_handler(arguments, context).await,
            ChatGreetTool::NAME => ChatGreetTool::http_handler(arguments),
            ChatRecapTool::NAME => ChatRecapTool::http_handler(arguments),
            ChatSummarizeTool::NAME => ChatSummarizeTool::http_handler(arguments, context).await,
            ChatTimeTool::NAME => ChatTimeTool::http_handler(arguments),
            ChatTranslateTool::NAME => ChatTranslateTool::http_handler(arguments, context).await,
            CodeAssistTool::NAME => CodeAssistTool::http_handler(arguments, context).await,
            CodeGenerateTool::NAME => CodeGenerateTool::http_handler(arguments, context).await,
            DocumentStoreTool::NAME => DocumentStoreTool::http_handler(arguments, context).await,
            FinanceValuationTool::NAME => FinanceValuationTool::http_handler(arguments),
            KvStoreTool::NAME => KvStoreTool::http_handler(arguments, context).await,
            ObjectStoreTool::NAME => ObjectStoreTool::http_handler(arguments, context).await,
            TableRowsTool::NAME => TableRowsTool::http_handler(arguments, context).await,
            WebFetchTool::NAME => WebFetchTool::http_handler(arguments, context).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;

    fn test_context() -> Arc<AppContext> {
        AppContext::new(&Config::default())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_context());
        let names = registry.tool_names();
        assert_eq!(names.len(), 16);
        assert!(names.contains(&"chat_ask"));
        assert!(names.contains(&"chat_classify"));
        assert!(names.contains(&"chat_compose"));
        assert!(names.contains(&"chat_greet"));
        assert!(names.contains(&"chat_recap"));
        assert!(names.contains(&"chat_summarize"));
        assert!(names.contains(&"chat_time"));
        assert!(names.contains(&"chat_translate"));
        assert!(names.contains(&"code_assist"));
        assert!(names.contains(&"code_generate"));
        assert!(names.contains(&"document_store"));
        assert!(names.contains(&"finance_valuation"));
        assert!(names.contains(&"kv_store"));
        assert!(names.contains(&"object_store"));
        assert!(names.contains(&"table_rows"));
        assert!(names.contains(&"web_fetch"));
    }

    #[test]
    fn test_names_match_tool_models() {
        let registry = ToolRegistry::new(test_context());
        let names = registry.tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(names.len(), tools.len());
        for tool in tools {
            assert!(names.contains(&tool.name.as_ref()));
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_greet() {
        let registry = ToolRegistry::new(test_context());
        let result = registry
            .call_tool("chat_greet", serde_json::json!({ "name": "Ada" }))
            .await;
        assert!(result.is_ok());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_context());
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(result.is_err());
    }
}
