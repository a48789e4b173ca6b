//! Web fetch tool definition.
//!
//! Three fetch modes: a JSON API response, the title of a web page, or
//! the top-level contents of a GitHub repository.

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
use crate::domains::tools::definitions::common::{
    error_result, structured_result, success_result,
};

/// Fetch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// GET a URL and return its JSON body.
    Json,

    /// GET a URL and return the page title.
    PageTitle,

    /// List the top-level contents of a GitHub repository.
    GithubRepo,
}

/// Parameters for the web fetch tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WebFetchParams {
    /// Mode: "json", "page_title", or "github_repo".
    pub mode: FetchMode,

    /// URL to fetch. Required for "json" and "page_title".
    #[serde(default)]
    pub url: Option<String>,

    /// Repository owner. Required for "github_repo".
    #[serde(default)]
    pub owner: Option<String>,

    /// Repository name. Required for "github_repo".
    #[serde(default)]
    pub repo: Option<String>,
}

/// Web fetch tool - pulls remote JSON, page titles, and GitHub listings.
pub struct WebFetchTool;

impl WebFetchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "web_fetch";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Fetch remote content: a JSON API response, a web page title, or a GitHub repository listing.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(mode = ?params.mode))]
    pub async fn execute(params: &WebFetchParams, context: &AppContext) -> CallToolResult {
        info!("Web fetch tool called");

        match params.mode {
            FetchMode::Json => {
                let Some(url) = &params.url else {
                    return error_result("Missing 'url' for json mode");
                };
                match context.api_fetcher.fetch_json(url).await {
                    Ok(body) => structured_result(&format!("Fetched {}", url), &body),
                    Err(e) => error_result(&format!("Fetch failed: {}", e)),
                }
            }
            FetchMode::PageTitle => {
                let Some(url) = &params.url else {
                    return error_result("Missing 'url' for page_title mode");
                };
                match context.page_fetcher.fetch_title(url).await {
                    Ok(title) => success_result(title),
                    Err(e) => error_result(&format!("Fetch failed: {}", e)),
                }
            }
            FetchMode::GithubRepo => {
                let (Some(owner), Some(repo)) = (&params.owner, &params.repo) else {
                    return error_result("Missing 'owner' or 'repo' for github_repo mode");
                };
                match context.github_fetcher.fetch_contents(owner, repo).await {
                    Ok(listing) => {
                        structured_result(&format!("Contents of {}/{}", owner, repo), &listing)
                    }
                    Err(e) => error_result(&format!("Fetch failed: {}", e)),
                }
            }
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: Arc<AppContext>,
    ) -> Result<serde_json::Value, String> {
        let params: WebFetchParams = serde_json::from_value(arguments)
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
            input_schema: cached_schema_for_type::<WebFetchParams>(),
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
                let params: WebFetchParams =
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
    use crate::core::config::Config;

    #[tokio::test]
    async fn test_json_mode_requires_url() {
        let context = AppContext::new(&Config::default());
        let params = WebFetchParams {
            mode: FetchMode::Json,
            url: None,
            owner: None,
            repo: None,
        };
        let result = WebFetchTool::execute(&params, &context).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_github_mode_requires_owner_and_repo() {
        let context = AppContext::new(&Config::default());
        let params = WebFetchParams {
            mode: FetchMode::GithubRepo,
            url: None,
            owner: Some("rust-lang".to_string()),
            repo: None,
        };
        let result = WebFetchTool::execute(&params, &context).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_mode_deserializes_snake_case() {
        let params: WebFetchParams = serde_json::from_value(serde_json::json!({
            "mode": "page_title",
            "url": "https://example.com"
        }))
        .unwrap();
        assert_eq!(params.mode, FetchMode::PageTitle);
    }
}
