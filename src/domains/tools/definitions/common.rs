//! Common utilities shared across tool definitions.
//!
//! Response formatting helpers and the small conversions every CRUD tool
//! needs between JSON values and backend documents.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::warn;

use crate::data_sources::Document;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a success result with a summary line followed by pretty JSON.
pub fn structured_result(summary: &str, value: &Value) -> CallToolResult {
    let body = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    CallToolResult::success(vec![Content::text(format!("{}\n\n{}", summary, body))])
}

/// Interpret an optional JSON value as a backend document.
///
/// `None` becomes an empty document; anything other than a JSON object is
/// rejected.
pub fn to_document(value: &Option<Value>) -> Result<Document, String> {
    match value {
        None => Ok(Document::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(format!("expected a JSON object, got: {}", other)),
    }
}

/// Extract the text from a tool result, for transports that re-wrap it.
#[cfg(feature = "http")]
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            rmcp::model::RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_document_accepts_none_and_objects() {
        assert!(to_document(&None).unwrap().is_empty());

        let doc = to_document(&Some(json!({"a": 1}))).unwrap();
        assert_eq!(doc["a"], json!(1));

        assert!(to_document(&Some(json!([1, 2]))).is_err());
        assert!(to_document(&Some(json!("text"))).is_err());
    }

    #[test]
    fn test_structured_result_contains_summary_and_json() {
        let result = structured_result("Found 1 item", &json!({"key": "k1"}));
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.starts_with("Found 1 item"));
        assert!(text.contains("\"key\""));
    }
}
