//! Tool registry
//!
//! Tools are registered once at startup. Execution failures, including
//! unknown tool names, come back as in-band descriptive strings so the
//! orchestrator can always hand a result to the provider.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use bizzhub_core::ToolDefinition;

use crate::tool::{Tool, ToolOutput};

/// Registry of available tools, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Re-registering a name replaces the old tool.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        debug!(tool = tool.name(), "registered tool");
        self.tools.push(tool);
    }

    /// Definitions of all registered tools
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name. Never panics and never propagates an
    /// error; failures are reported in the output.
    pub async fn execute(&self, name: &str, arguments: Value) -> ToolOutput {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "unknown tool requested");
            return ToolOutput::error(format!("Unknown tool: {}", name));
        };

        match tool.execute(arguments).await {
            Ok(output) => output,
            Err(err) => {
                warn!(tool = name, error = %err, "tool execution failed");
                ToolOutput::error(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::ToolError;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn definition(&self) -> ToolDefinition {
            ToolDefinition::new(
                "echo",
                "Echo the input back",
                json!({"type": "object", "properties": {"text": {"type": "string"}}}),
            )
        }

        async fn execute(&self, arguments: Value) -> Result<ToolOutput, ToolError> {
            let text = arguments
                .get("text")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ToolError::InvalidArguments("text is required".to_string()))?;
            Ok(ToolOutput::ok(text))
        }
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        assert!(registry.has("echo"));
        assert_eq!(registry.definitions().len(), 1);

        let output = registry.execute("echo", json!({"text": "hi"})).await;
        assert!(!output.is_error);
        assert_eq!(output.content, "hi");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_in_band() {
        let registry = ToolRegistry::new();
        let output = registry.execute("missing", json!({})).await;
        assert!(output.is_error);
        assert_eq!(output.content, "Unknown tool: missing");
    }

    #[tokio::test]
    async fn test_bad_arguments_are_in_band() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let output = registry.execute("echo", json!({})).await;
        assert!(output.is_error);
        assert!(output.content.contains("text is required"));
    }
}
