//! REST facade over the chat and code tools.
//!
//! Plain HTTP routes under `/api/v1` so the LLM tools can be used without
//! speaking JSON-RPC. Each handler builds the corresponding tool's
//! parameters, runs it, and wraps the text result as `{"result": ...}`;
//! tool failures become a 500 with a terse `detail`.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rmcp::model::CallToolResult;
use serde::Deserialize;

use super::http::AppState;
use crate::domains::tools::definitions::chat::{
    ChatAskParams, ChatAskTool, ChatClassifyParams, ChatClassifyTool, ChatComposeParams,
    ChatComposeTool, ChatSummarizeParams, ChatSummarizeTool, ChatTranslateParams,
    ChatTranslateTool, ClassifyKind, ComposeMode, translate,
};
use crate::domains::tools::definitions::code::{
    AssistAction, CodeAssistParams, CodeAssistTool, CodeGenerateParams, CodeGenerateTool, generate,
};
use crate::domains::tools::definitions::common::result_text;

/// Build the `/api/v1` router.
pub(super) fn rest_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/chat/ask", get(chat_ask))
        .route("/api/v1/chat/classify", get(chat_classify))
        .route("/api/v1/chat/sentiment", get(chat_sentiment))
        .route("/api/v1/chat/summarize", get(chat_summarize))
        .route("/api/v1/chat/translate", get(chat_translate))
        .route("/api/v1/chat/complete", get(chat_complete))
        .route("/api/v1/chat/generate-text", get(chat_generate_text))
        .route("/api/v1/chat/paraphrase", get(chat_paraphrase))
        .route("/api/v1/chat/instruction", get(chat_instruction))
        .route("/api/v1/code/generate", post(code_generate))
        .route("/api/v1/code/fix", post(code_fix))
        .route("/api/v1/code/explain", post(code_explain))
        .route("/api/v1/code/test", post(code_test))
        .route("/api/v1/code/debug", post(code_debug))
        .route("/api/v1/code/docstring", post(code_docstring))
}

/// Convert a tool result into a REST response.
fn respond(result: CallToolResult) -> Response {
    let text = result_text(&result);
    if result.is_error.unwrap_or(false) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": text })),
        )
            .into_response()
    } else {
        Json(serde_json::json!({ "result": text })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Query/body shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AskQuery {
    question: String,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextQuery {
    text: String,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslateQuery {
    text: String,
    language: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TopicQuery {
    topic: String,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TaskQuery {
    task: String,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateBody {
    prompt: String,
    language: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CodeBody {
    code: String,
    model: Option<String>,
}

// ---------------------------------------------------------------------------
// Chat endpoints
// ---------------------------------------------------------------------------

async fn chat_ask(State(state): State<AppState>, Query(q): Query<AskQuery>) -> Response {
    let params = ChatAskParams {
        question: q.question,
        model: q.model,
    };
    respond(ChatAskTool::execute(&params, state.server.context()).await)
}

async fn chat_classify(State(state): State<AppState>, Query(q): Query<TextQuery>) -> Response {
    let params = ChatClassifyParams {
        text: q.text,
        kind: ClassifyKind::Topic,
        model: q.model,
    };
    respond(ChatClassifyTool::execute(&params, state.server.context()).await)
}

async fn chat_sentiment(State(state): State<AppState>, Query(q): Query<TextQuery>) -> Response {
    let params = ChatClassifyParams {
        text: q.text,
        kind: ClassifyKind::Sentiment,
        model: q.model,
    };
    respond(ChatClassifyTool::execute(&params, state.server.context()).await)
}

async fn chat_summarize(State(state): State<AppState>, Query(q): Query<TextQuery>) -> Response {
    let params = ChatSummarizeParams {
        text: q.text,
        max_sentences: None,
        model: q.model,
    };
    respond(ChatSummarizeTool::execute(&params, state.server.context()).await)
}

async fn chat_translate(
    State(state): State<AppState>,
    Query(q): Query<TranslateQuery>,
) -> Response {
    let params = ChatTranslateParams {
        text: q.text,
        language: q.language.unwrap_or_else(translate::default_language),
        model: q.model,
    };
    respond(ChatTranslateTool::execute(&params, state.server.context()).await)
}

async fn chat_complete(State(state): State<AppState>, Query(q): Query<TextQuery>) -> Response {
    compose(state, q.text, ComposeMode::Complete, q.model).await
}

async fn chat_generate_text(
    State(state): State<AppState>,
    Query(q): Query<TopicQuery>,
) -> Response {
    compose(state, q.topic, ComposeMode::Generate, q.model).await
}

async fn chat_paraphrase(State(state): State<AppState>, Query(q): Query<TextQuery>) -> Response {
    compose(state, q.text, ComposeMode::Paraphrase, q.model).await
}

async fn chat_instruction(State(state): State<AppState>, Query(q): Query<TaskQuery>) -> Response {
    compose(state, q.task, ComposeMode::Instruction, q.model).await
}

async fn compose(state: AppState, text: String, mode: ComposeMode, model: Option<String>) -> Response {
    let params = ChatComposeParams { text, mode, model };
    respond(ChatComposeTool::execute(&params, state.server.context()).await)
}

// ---------------------------------------------------------------------------
// Code endpoints
// ---------------------------------------------------------------------------

async fn code_generate(State(state): State<AppState>, Json(body): Json<GenerateBody>) -> Response {
    let params = CodeGenerateParams {
        prompt: body.prompt,
        language: body.language.unwrap_or_else(generate::default_language),
        model: body.model,
    };
    respond(CodeGenerateTool::execute(&params, state.server.context()).await)
}

async fn code_fix(State(state): State<AppState>, Json(body): Json<CodeBody>) -> Response {
    assist(state, body, AssistAction::Fix).await
}

async fn code_explain(State(state): State<AppState>, Json(body): Json<CodeBody>) -> Response {
    assist(state, body, AssistAction::Explain).await
}

async fn code_test(State(state): State<AppState>, Json(body): Json<CodeBody>) -> Response {
    assist(state, body, AssistAction::Tests).await
}

async fn code_debug(State(state): State<AppState>, Json(body): Json<CodeBody>) -> Response {
    assist(state, body, AssistAction::Debug).await
}

async fn code_docstring(State(state): State<AppState>, Json(body): Json<CodeBody>) -> Response {
    assist(state, body, AssistAction::Docstring).await
}

async fn assist(state: AppState, body: CodeBody, action: AssistAction) -> Response {
    let params = CodeAssistParams {
        code: body.code,
        action,
        model: body.model,
    };
    respond(CodeAssistTool::execute(&params, state.server.context()).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::transport::http::build_router;
    use crate::core::McpServer;
    use crate::domains::tools::definitions::common::{error_result, success_result};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        build_router("/mcp", AppState::new(McpServer::new(Config::default())))
    }

    #[test]
    fn test_respond_wraps_success_text() {
        let response = respond(success_result("hello".to_string()));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_respond_maps_tool_errors_to_500() {
        let response = respond(error_result("backend down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app();
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_root_reports_status() {
        let app = test_app();
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "API up!");
        assert_eq!(json["name"], "llm-mcp-server");
    }

    #[tokio::test]
    async fn test_chat_ask_requires_question_param() {
        let app = test_app();
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/v1/chat/ask")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
