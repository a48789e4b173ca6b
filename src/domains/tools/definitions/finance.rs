//! Company valuation tool definition.
//!
//! Simplified discounted cash flow: a single growing perpetuity of the
//! latest earnings. Deterministic, no model call.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{error_result, success_result};

/// Parameters for the valuation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinanceValuationParams {
    /// Most recent annual earnings.
    pub earnings: f64,

    /// Expected perpetual growth rate, e.g. 0.02 for 2%.
    pub growth_rate: f64,

    /// Discount rate, e.g. 0.08 for 8%. Must exceed the growth rate.
    pub discount_rate: f64,
}

/// Valuation tool - estimates company value from a growing perpetuity.
pub struct FinanceValuationTool;

impl FinanceValuationTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "finance_valuation";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Estimate a company's value with a simplified DCF: earnings * (1 + g) / (r - g).";

    /// Growing perpetuity value, rounded to 2 decimals.
    fn valuation(earnings: f64, growth_rate: f64, discount_rate: f64) -> Result<f64, String> {
        if growth_rate >= discount_rate {
            return Err(format!(
                "Growth rate ({}) must be below the discount rate ({})",
                growth_rate, discount_rate
            ));
        }
        let value = earnings * (1.0 + growth_rate) / (discount_rate - growth_rate);
        Ok((value * 100.0).round() / 100.0)
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(params: &FinanceValuationParams) -> CallToolResult {
        info!("Valuation tool called");

        match Self::valuation(params.earnings, params.growth_rate, params.discount_rate) {
            Ok(value) => success_result(format!("Estimated company value: {:.2}", value)),
            Err(e) => error_result(&e),
        }
    }

    /// HTTP handler for this tool.
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: FinanceValuationParams = serde_json::from_value(arguments)
            .map_err(|e| format!("Invalid parameters: {}", e))?;

        let result = Self::execute(&params);
        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FinanceValuationParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: FinanceValuationParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valuation_growing_perpetuity() {
        // 100 * 1.02 / 0.06 = 1700.00
        let value = FinanceValuationTool::valuation(100.0, 0.02, 0.08).unwrap();
        assert_eq!(value, 1700.0);
    }

    #[test]
    fn test_valuation_rounds_to_cents() {
        let value = FinanceValuationTool::valuation(100.0, 0.03, 0.10).unwrap();
        assert_eq!(value, 1471.43);
    }

    #[test]
    fn test_growth_at_or_above_discount_is_rejected() {
        assert!(FinanceValuationTool::valuation(100.0, 0.08, 0.08).is_err());
        assert!(FinanceValuationTool::valuation(100.0, 0.10, 0.08).is_err());
    }
}
