//! Coding agent prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Expert programming assistant persona.
pub struct CodingAgentPrompt;

impl PromptDefinition for CodingAgentPrompt {
    const NAME: &'static str = "coding_agent";
    const DESCRIPTION: &'static str = "An expert programming assistant persona for a coding task";

    fn template() -> &'static str {
        "You are an expert programming assistant. Write correct, idiomatic code and explain non-obvious decisions briefly.\n\nTask: {{task}}{{#if language}}\n\nTarget language: {{language}}{{/if}}"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "task".to_string(),
                title: None,
                description: Some("The coding task to carry out".to_string()),
                required: Some(true),
            },
            PromptArgument {
                name: "language".to_string(),
                title: None,
                description: Some("Target programming language".to_string()),
                required: Some(false),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coding_agent_metadata() {
        assert_eq!(CodingAgentPrompt::NAME, "coding_agent");
        assert!(CodingAgentPrompt::template().contains("{{task}}"));

        let args = CodingAgentPrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "task");
    }
}
