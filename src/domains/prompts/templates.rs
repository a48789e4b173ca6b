//! Prompt templates module.
//!
//! This module contains the PromptTemplate struct and the small rendering
//! engine behind it.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with placeholders.
    /// Uses a simple {{variable}} syntax for substitution.
    pub template: String,
}

impl PromptTemplate {
    /// Render the template with the given arguments.
    ///
    /// Supported syntax:
    /// - `{{variable}}` is replaced with the value of `variable`
    /// - `{{#if variable}}content{{/if}}` includes content only if the
    ///   variable is set and non-empty
    /// - `{{#if variable}}content{{else}}alternative{{/if}}` with else support
    ///
    /// Unmatched `{{variable}}` placeholders (optional arguments the caller
    /// left out) are removed.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut result = process_conditionals(&self.template, arguments)?;

        for (key, value) in arguments {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }

        Ok(strip_unmatched_placeholders(&result))
    }
}

/// Expand every `{{#if}}...{{/if}}` block.
fn process_conditionals(
    template: &str,
    arguments: &HashMap<String, String>,
) -> Result<String, PromptError> {
    const IF_TAG: &str = "{{#if ";
    const ELSE_TAG: &str = "{{else}}";
    const ENDIF_TAG: &str = "{{/if}}";

    let mut result = template.to_string();

    while let Some(if_start) = result.find(IF_TAG) {
        let var_close = result[if_start..]
            .find("}}")
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?
            + if_start;
        let var_name = result[if_start + IF_TAG.len()..var_close].trim().to_string();

        let endif = result[var_close..]
            .find(ENDIF_TAG)
            .ok_or_else(|| PromptError::template("Missing {{/if}} tag"))?
            + var_close;

        let body = &result[var_close + 2..endif];
        let (when_set, when_unset) = match body.find(ELSE_TAG) {
            Some(pos) => (&body[..pos], &body[pos + ELSE_TAG.len()..]),
            None => (body, ""),
        };

        let is_set = arguments.get(&var_name).is_some_and(|v| !v.is_empty());
        let chosen = if is_set { when_set } else { when_unset };

        result = format!(
            "{}{}{}",
            &result[..if_start],
            chosen,
            &result[endif + ENDIF_TAG.len()..]
        );
    }

    Ok(result)
}

/// Remove simple `{{variable}}` placeholders that were never substituted.
fn strip_unmatched_placeholders(template: &str) -> String {
    let mut result = template.to_string();
    let mut search_from = 0;

    while let Some(pos) = result[search_from..].find("{{") {
        let open = search_from + pos;
        let Some(close) = result[open..].find("}}") else {
            break;
        };
        let close = open + close + 2;

        let placeholder = &result[open..close];
        if placeholder.contains('#') || placeholder.contains('/') {
            search_from = open + 2;
        } else {
            result.replace_range(open..close, "");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(body: &str) -> PromptTemplate {
        PromptTemplate {
            name: "test".to_string(),
            description: None,
            arguments: vec![],
            template: body.to_string(),
        }
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let result = template("Hello, {{name}}!")
            .render(&args(&[("name", "World")]))
            .unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_conditional_with_value() {
        let result = template("Hello{{#if name}}, {{name}}{{/if}}!")
            .render(&args(&[("name", "World")]))
            .unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_conditional_without_value() {
        let result = template("Hello{{#if name}}, {{name}}{{/if}}!")
            .render(&HashMap::new())
            .unwrap();
        assert_eq!(result, "Hello!");
    }

    #[test]
    fn test_conditional_with_else() {
        let result = template("Hello, {{#if name}}{{name}}{{else}}stranger{{/if}}!")
            .render(&HashMap::new())
            .unwrap();
        assert_eq!(result, "Hello, stranger!");
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let result = template("{{#if note}}note: {{note}}{{else}}no note{{/if}}")
            .render(&args(&[("note", "")]))
            .unwrap();
        assert_eq!(result, "no note");
    }

    #[test]
    fn test_unmatched_placeholder_is_removed() {
        let result = template("Task: {{task}} {{extra}}")
            .render(&args(&[("task", "sort")]))
            .unwrap();
        assert_eq!(result, "Task: sort ");
    }

    #[test]
    fn test_unclosed_if_is_an_error() {
        let result = template("{{#if name").render(&HashMap::new());
        assert!(result.is_err());
    }
}
