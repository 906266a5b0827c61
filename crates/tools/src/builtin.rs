//! Built-in tools

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use serde_json::{json, Value};

use bizzhub_core::ToolDefinition;

use crate::calc::{self, CalcError};
use crate::currency::CurrencyRateClient;
use crate::registry::ToolRegistry;
use crate::tool::{Tool, ToolOutput};
use crate::ToolError;

fn required_str(arguments: &Value, key: &str) -> Result<String, ToolError> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ToolError::InvalidArguments(format!("'{}' is required", key)))
}

fn required_f64(arguments: &Value, key: &str) -> Result<f64, ToolError> {
    arguments
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| ToolError::InvalidArguments(format!("'{}' is required", key)))
}

/// Converts amounts between currencies via the rate client
pub struct CurrencyConverterTool {
    client: Arc<CurrencyRateClient>,
}

impl CurrencyConverterTool {
    pub fn new(client: Arc<CurrencyRateClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CurrencyConverterTool {
    fn name(&self) -> &str {
        "currency_converter"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "currency_converter",
            "Convert currency amounts between different currencies",
            json!({
                "type": "object",
                "properties": {
                    "amount": {"type": "number", "description": "Amount to convert"},
                    "from_currency": {"type": "string", "description": "Source currency code (e.g., USD)"},
                    "to_currency": {"type": "string", "description": "Target currency code (e.g., EUR)"}
                },
                "required": ["amount", "from_currency", "to_currency"]
            }),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, ToolError> {
        let amount = required_f64(&arguments, "amount")?;
        let from = required_str(&arguments, "from_currency")?;
        let to = required_str(&arguments, "to_currency")?;

        let converted = self.client.convert(amount, &from, &to).await?;
        Ok(ToolOutput::ok(format!(
            "{} {} = {} {}",
            calc::format_number(amount),
            from.to_uppercase(),
            calc::format_number(converted),
            to.to_uppercase(),
        )))
    }
}

/// Reports the current local time
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "get_current_time"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_current_time",
            "Get the current time and date",
            json!({
                "type": "object",
                "properties": {}
            }),
        )
    }

    async fn execute(&self, _arguments: Value) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::ok(
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ))
    }
}

/// Evaluates whitelisted arithmetic expressions
pub struct CalculateTool;

#[async_trait]
impl Tool for CalculateTool {
    fn name(&self) -> &str {
        "calculate"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "calculate",
            "Perform mathematical calculations",
            json!({
                "type": "object",
                "properties": {
                    "expression": {"type": "string", "description": "Mathematical expression to evaluate"}
                },
                "required": ["expression"]
            }),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, ToolError> {
        let expression = required_str(&arguments, "expression")?;

        match calc::evaluate(&expression) {
            Ok(value) => Ok(ToolOutput::ok(calc::format_number(value))),
            Err(CalcError::InvalidExpression) => Ok(ToolOutput::error("Invalid expression")),
            Err(CalcError::CalculationError) => Ok(ToolOutput::error("Calculation error")),
        }
    }
}

/// Registry with all built-in tools registered
pub fn default_registry(client: Arc<CurrencyRateClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CurrencyConverterTool::new(client)));
    registry.register(Arc::new(CurrentTimeTool));
    registry.register(Arc::new(CalculateTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn registry() -> ToolRegistry {
        let client = Arc::new(
            CurrencyRateClient::new(
                "https://api.exchangerate-api.com/v4/latest/",
                Duration::from_secs(10),
                Duration::from_secs(1800),
            )
            .unwrap(),
        );
        default_registry(client)
    }

    #[tokio::test]
    async fn test_default_registry() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        let names: Vec<String> = registry
            .definitions()
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, vec!["currency_converter", "get_current_time", "calculate"]);
    }

    #[tokio::test]
    async fn test_calculate_tool() {
        let registry = registry();

        let output = registry
            .execute("calculate", json!({"expression": "2+2*5"}))
            .await;
        assert!(!output.is_error);
        assert_eq!(output.content, "12");

        let output = registry
            .execute("calculate", json!({"expression": "import os"}))
            .await;
        assert!(output.is_error);
        assert_eq!(output.content, "Invalid expression");
    }

    #[tokio::test]
    async fn test_current_time_format() {
        let registry = registry();
        let output = registry.execute("get_current_time", json!({})).await;
        assert!(!output.is_error);
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(output.content.len(), 19);
    }

    #[tokio::test]
    async fn test_currency_converter_same_code() {
        let registry = registry();
        let output = registry
            .execute(
                "currency_converter",
                json!({"amount": 50.0, "from_currency": "INR", "to_currency": "INR"}),
            )
            .await;
        assert!(!output.is_error);
        assert_eq!(output.content, "50 INR = 50 INR");
    }

    #[tokio::test]
    async fn test_currency_converter_missing_args() {
        let registry = registry();
        let output = registry
            .execute("currency_converter", json!({"amount": 50.0}))
            .await;
        assert!(output.is_error);
        assert!(output.content.contains("from_currency"));
    }
}
