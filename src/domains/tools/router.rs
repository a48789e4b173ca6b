//! Tool Router - builds the rmcp ToolRouter from the definitions.
//!
//! Each tool knows how to create its own route; this module just strings
//! them together for the STDIO/TCP transport.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::context::AppContext;

use super::definitions::{
    ChatAskTool, ChatClassifyTool, ChatComposeTool, ChatGreetTool, ChatRecapTool,
    ChatSummarizeTool, ChatTimeTool, ChatTranslateTool, CodeAssistTool, CodeGenerateTool,
    DocumentStoreTool, FinanceValuationTool, KvStoreTool, ObjectStoreTool, TableRowsTool,
    WebFetchTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(context: Arc<AppContext>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ChatAskTool::create_route(context.clone()))
        .with_route(ChatClassifyTool::create_route(context.clone()))
        .with_route(ChatComposeTool::create_route(context.clone()))
        .with_route(ChatGreetTool::create_route())
        .with_route(ChatRecapTool::create_route())
        .with_route(ChatSummarizeTool::create_route(context.clone()))
        .with_route(ChatTimeTool::create_route())
        .with_route(ChatTranslateTool::create_route(context.clone()))
        .with_route(CodeAssistTool::create_route(context.clone()))
        .with_route(CodeGenerateTool::create_route(context.clone()))
        .with_route(DocumentStoreTool::create_route(context.clone()))
        .with_route(FinanceValuationTool::create_route())
        .with_route(KvStoreTool::create_route(context.clone()))
        .with_route(ObjectStoreTool::create_route(context.clone()))
        .with_route(TableRowsTool::create_route(context.clone()))
        .with_route(WebFetchTool::create_route(context))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::config::Config;

    struct TestServer {}

    fn test_context() -> Arc<AppContext> {
        AppContext::new(&Config::default())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_context());
        let tools = router.list_all();
        assert_eq!(tools.len(), 16);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"chat_ask"));
        assert!(names.contains(&"code_generate"));
        assert!(names.contains(&"object_store"));
        assert!(names.contains(&"web_fetch"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let context = test_context();
        let registry = ToolRegistry::new(context.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(context);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
