//! Chat status resource definition.
//!
//! Dynamic: reports whether the Ollama runtime answers, and which models
//! it serves.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Ollama runtime status (dynamic).
pub struct ChatStatusResource;

impl ResourceDefinition for ChatStatusResource {
    const URI: &'static str = "resource://chat/status";
    const NAME: &'static str = "Chat Runtime Status";
    const DESCRIPTION: &'static str = "Availability and model list of the Ollama runtime";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ChatStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_status_metadata() {
        assert_eq!(ChatStatusResource::URI, "resource://chat/status");
        assert_eq!(ChatStatusResource::MIME_TYPE, "application/json");
    }
}
