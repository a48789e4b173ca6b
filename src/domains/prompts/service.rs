//! Prompt service implementation.
//!
//! The PromptService manages prompt templates and their instantiation.
//! It maintains a registry of available prompts and handles argument substitution.
//!
//! Prompts are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new prompt does NOT require modifying this file.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::info;

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for managing and instantiating prompts.
///
/// This service maintains a registry of prompt templates and handles
/// prompt listing and argument substitution.
pub struct PromptService {
    /// Registry of available prompts.
    /// Key: prompt name, Value: prompt template
    prompts: HashMap<String, PromptTemplate>,
}

impl PromptService {
    /// Create a new PromptService.
    pub fn new() -> Self {
        info!("Initializing PromptService");

        let mut service = Self {
            prompts: HashMap::new(),
        };

        // Register all prompts from registry
        service.register_from_registry();

        service
    }

    /// Register all prompts from the registry.
    fn register_from_registry(&mut self) {
        info!("Registering prompts from registry");
        for template in get_all_prompts() {
            self.register_prompt(template);
        }
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) {
        info!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        // Validate required arguments
        for arg in &template.arguments {
            if arg.required.unwrap_or(false) && !arguments.contains_key(&arg.name) {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        // Render the template
        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompt_service_creation() {
        let service = PromptService::new();
        let prompts = service.list_prompts().await;
        assert_eq!(prompts.len(), 3);
    }

    #[tokio::test]
    async fn test_get_prompt_with_arguments() {
        let service = PromptService::new();

        let mut args = HashMap::new();
        args.insert("input".to_string(), "What is MCP?".to_string());

        let result = service.get_prompt("chat_agent", Some(args)).await.unwrap();
        let rmcp::model::PromptMessageContent::Text { text } = &result.messages[0].content else {
            panic!("Expected text message");
        };
        assert!(text.contains("User: What is MCP?"));
        assert!(!text.contains("Conversation so far"));
    }

    #[tokio::test]
    async fn test_get_prompt_with_history() {
        let service = PromptService::new();

        let mut args = HashMap::new();
        args.insert("input".to_string(), "And now?".to_string());
        args.insert("history".to_string(), "Hi\nHello".to_string());

        let result = service.get_prompt("chat_agent", Some(args)).await.unwrap();
        let rmcp::model::PromptMessageContent::Text { text } = &result.messages[0].content else {
            panic!("Expected text message");
        };
        assert!(text.contains("Conversation so far:\nHi\nHello"));
    }

    #[tokio::test]
    async fn test_get_prompt_missing_required_argument() {
        let service = PromptService::new();
        let result = service.get_prompt("chat_agent", None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let service = PromptService::new();
        let result = service.get_prompt("nonexistent", None).await;
        assert!(result.is_err());
    }
}
