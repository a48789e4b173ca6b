//! Code languages resource definition.
//!
//! Exposes the code generation language map so clients can see which
//! languages get a dedicated instruction preamble.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;
use crate::domains::tools::definitions::code::LANGUAGE_PREAMBLES;

/// Supported code generation languages (static, derived from the map).
pub struct CodeLanguagesResource;

impl ResourceDefinition for CodeLanguagesResource {
    const URI: &'static str = "resource://code/languages";
    const NAME: &'static str = "Code Generation Languages";
    const DESCRIPTION: &'static str =
        "Languages with a dedicated code generation instruction, and that instruction";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        let map: serde_json::Map<String, serde_json::Value> = LANGUAGE_PREAMBLES
            .iter()
            .map(|(language, preamble)| (language.to_string(), json!(preamble)))
            .collect();
        let body = serde_json::to_string_pretty(&map)
            .unwrap_or_else(|_| "{}".to_string());
        ResourceContent::Text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_content_is_json_with_all_entries() {
        let ResourceContent::Text(text) = CodeLanguagesResource::content() else {
            panic!("Expected static text content");
        };
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let map = parsed.as_object().unwrap();
        assert_eq!(map.len(), LANGUAGE_PREAMBLES.len());
        assert!(map.contains_key("python"));
        assert!(map.contains_key("go"));
    }
}
