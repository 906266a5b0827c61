//! Tool trait and output type

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use bizzhub_core::ToolDefinition;

use crate::ToolError;

/// Result of a tool execution
///
/// `is_error` marks in-band failures such as an unsupported currency
/// code. The content is always safe to feed back to a provider.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// An executable tool offered to LLM providers
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name
    fn name(&self) -> &str;

    /// Definition surfaced to providers for tool selection
    fn definition(&self) -> ToolDefinition;

    /// Execute with JSON arguments
    async fn execute(&self, arguments: Value) -> Result<ToolOutput, ToolError>;
}
