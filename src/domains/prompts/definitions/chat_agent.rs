//! Chat agent prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Conversational assistant persona with optional history.
pub struct ChatAgentPrompt;

impl PromptDefinition for ChatAgentPrompt {
    const NAME: &'static str = "chat_agent";
    const DESCRIPTION: &'static str =
        "A conversational assistant persona, optionally primed with prior history";

    fn template() -> &'static str {
        "You are a helpful, conversational assistant. Answer clearly and concisely.\n\n{{#if history}}Conversation so far:\n{{history}}\n\n{{/if}}User: {{input}}"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "input".to_string(),
                title: None,
                description: Some("The user's message".to_string()),
                required: Some(true),
            },
            PromptArgument {
                name: "history".to_string(),
                title: None,
                description: Some("Prior conversation, one message per line".to_string()),
                required: Some(false),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_agent_metadata() {
        assert_eq!(ChatAgentPrompt::NAME, "chat_agent");
        assert!(!ChatAgentPrompt::DESCRIPTION.is_empty());

        let args = ChatAgentPrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "input");
        assert_eq!(args[0].required, Some(true));
        assert_eq!(args[1].required, Some(false));
    }
}
