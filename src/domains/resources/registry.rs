//! Resource Registry - central registration of all resources.
//!
//! This module provides dynamic resource registration without modifying service.rs.
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, ResourceTemplate};

use super::definitions::{
    ChatHelpResource, ChatStatusResource, CodeLanguagesResource, ResourceDefinition,
    ServerInfoResource,
};
use super::service::ResourceEntry;

/// Helper function to create an annotated resource from a definition.
fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

/// Get all registered resources as ResourceEntries.
///
/// This is the central place where all resources are registered.
/// When adding a new resource, add it here.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<ChatHelpResource>(),
        build_resource::<ChatStatusResource>(),
        build_resource::<CodeLanguagesResource>(),
        build_resource::<ServerInfoResource>(),
    ]
}

/// Get all registered resource templates.
///
/// Resource templates use URI templates (RFC 6570) to describe
/// parameterized resources that clients can fill in.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        // Page title template
        RawResourceTemplate {
            uri_template: "resource://website-content/{url}".to_string(),
            name: "Website Content".to_string(),
            title: Some("Fetch Website Content".to_string()),
            description: Some("Title of the web page at the given URL".to_string()),
            mime_type: Some("text/plain".to_string()),
        }
        .no_annotation(),
        // JSON API template
        RawResourceTemplate {
            uri_template: "resource://api-data/{url}".to_string(),
            name: "API Data".to_string(),
            title: Some("Fetch API Data".to_string()),
            description: Some("JSON response of the API at the given URL".to_string()),
            mime_type: Some("application/json".to_string()),
        }
        .no_annotation(),
        // GitHub repository template
        RawResourceTemplate {
            uri_template: "resource://github-repo/{owner}/{repo}".to_string(),
            name: "GitHub Repository".to_string(),
            title: Some("List GitHub Repository Contents".to_string()),
            description: Some("Top-level contents of a GitHub repository".to_string()),
            mime_type: Some("application/json".to_string()),
        }
        .no_annotation(),
    ]
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![
        ChatHelpResource::URI,
        ChatStatusResource::URI,
        CodeLanguagesResource::URI,
        ServerInfoResource::URI,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), 4);

        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource.raw.uri.as_str())
            .collect();
        assert!(uris.contains(&"resource://chat/help"));
        assert!(uris.contains(&"resource://chat/status"));
        assert!(uris.contains(&"resource://code/languages"));
        assert!(uris.contains(&"mcp://server/info"));
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 3);

        let uri_templates: Vec<_> = templates
            .iter()
            .map(|t| t.raw.uri_template.as_str())
            .collect();
        assert!(uri_templates.contains(&"resource://website-content/{url}"));
        assert!(uri_templates.contains(&"resource://api-data/{url}"));
        assert!(uri_templates.contains(&"resource://github-repo/{owner}/{repo}"));
    }

    #[test]
    fn test_resource_uris() {
        let uris = resource_uris();
        assert_eq!(uris.len(), 4);
        assert!(uris.contains(&"mcp://server/info"));
    }
}
