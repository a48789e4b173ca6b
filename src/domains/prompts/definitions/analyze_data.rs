//! Data analysis prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Asks for an analysis of a list of data points.
pub struct AnalyzeDataPrompt;

impl PromptDefinition for AnalyzeDataPrompt {
    const NAME: &'static str = "analyze_data";
    const DESCRIPTION: &'static str =
        "Ask for trends, outliers, and a conclusion over a list of data points";

    fn template() -> &'static str {
        "Analyze the following data points. Describe the overall trend, point out outliers, and finish with a short conclusion.\n\nData:\n{{data}}{{#if focus}}\n\nFocus the analysis on: {{focus}}{{/if}}"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "data".to_string(),
                title: None,
                description: Some("The data points, one per line".to_string()),
                required: Some(true),
            },
            PromptArgument {
                name: "focus".to_string(),
                title: None,
                description: Some("Optional aspect to focus the analysis on".to_string()),
                required: Some(false),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_data_metadata() {
        assert_eq!(AnalyzeDataPrompt::NAME, "analyze_data");
        assert!(AnalyzeDataPrompt::template().contains("{{data}}"));

        let args = AnalyzeDataPrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].required, Some(true));
    }
}
