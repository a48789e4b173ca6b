//! Chat help resource definition.
//!
//! Static usage notes for the conversation tools.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

const HELP_TEXT: &str = "\
LLM chat tools

- chat_ask: answer a free-form question.
- chat_classify: label a text's topic, or judge its sentiment (kind = topic | sentiment).
- chat_summarize: condense a text into a few sentences.
- chat_translate: translate a text; 'language' defaults to Spanish.
- chat_compose: complete a fragment, write about a topic, paraphrase, or follow an instruction (mode = complete | generate | paraphrase | instruction).
- chat_greet: deterministic time-of-day greeting.
- chat_recap: return the last five messages of a conversation.
- chat_time: return the current server time.

All model-backed tools accept an optional 'model' parameter; when omitted the
server's configured default model is used.
";

/// Usage notes for the chat tools (static).
pub struct ChatHelpResource;

impl ResourceDefinition for ChatHelpResource {
    const URI: &'static str = "resource://chat/help";
    const NAME: &'static str = "Chat Tools Help";
    const DESCRIPTION: &'static str = "Usage notes for the conversation tools";
    const MIME_TYPE: &'static str = "text/plain";

    fn content() -> ResourceContent {
        ResourceContent::Text(HELP_TEXT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_chat_tool() {
        let ResourceContent::Text(text) = ChatHelpResource::content() else {
            panic!("Expected static text content");
        };
        for tool in [
            "chat_ask",
            "chat_classify",
            "chat_summarize",
            "chat_translate",
            "chat_compose",
            "chat_greet",
            "chat_recap",
            "chat_time",
        ] {
            assert!(text.contains(tool), "missing {}", tool);
        }
    }
}
