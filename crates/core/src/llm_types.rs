//! LLM request/response types
//!
//! Common types for interacting with language model providers
//! (Gemini, OpenAI, and any future backend).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A completion request sent to a provider backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Messages for chat completion
    pub messages: Vec<Message>,
    /// Tool definitions offered to the provider (empty = tools disabled)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for CompletionRequest {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            tools: Vec::new(),
            max_tokens: None,
            temperature: Some(0.7),
        }
    }
}

impl CompletionRequest {
    /// Create a request from a single user prompt
    pub fn prompt(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(content)],
            ..Default::default()
        }
    }

    /// Add a message
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Offer tool definitions to the provider
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    /// Check whether tools are offered
    pub fn tools_enabled(&self) -> bool {
        !self.tools.is_empty()
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Tool call ID (for tool responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            tool_call_id: None,
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_call_id: None,
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_call_id: None,
        }
    }

    /// Create a tool result message
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generation response from a provider backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text
    pub text: String,
    /// Finish reason
    pub finish_reason: FinishReason,
    /// Tool call requested by the provider, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
}

impl GenerateResponse {
    /// Create a simple text response
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: content.into(),
            finish_reason: FinishReason::Stop,
            tool_call: None,
        }
    }

    /// Create a response that requests a tool call
    pub fn tool_call(call: ToolCall) -> Self {
        Self {
            text: String::new(),
            finish_reason: FinishReason::ToolCall,
            tool_call: Some(call),
        }
    }

    /// Check if the provider requested a tool call
    pub fn has_tool_call(&self) -> bool {
        self.tool_call.is_some()
    }
}

/// Finish reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Normal completion
    #[default]
    Stop,
    /// Hit max tokens limit
    Length,
    /// Provider wants a tool executed
    ToolCall,
    /// Error occurred
    Error,
}

/// Tool definition surfaced to providers for tool selection
///
/// `parameters` follows the uniform `{required: [...], properties: {...}}`
/// JSON-schema shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (unique within a registry)
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON schema for parameters
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A tool invocation requested by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call ID (absent for prompt-convention providers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tool name
    pub name: String,
    /// Arguments (JSON object)
    pub arguments: Value,
}

impl ToolCall {
    /// Create a call without a provider-assigned ID
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments,
        }
    }

    /// Get argument as string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get argument as f64
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.arguments.get(key).and_then(|v| v.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let req = CompletionRequest::prompt("Hello")
            .with_max_tokens(100)
            .with_temperature(0.5);

        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.max_tokens, Some(100));
        assert_eq!(req.temperature, Some(0.5));
        assert!(!req.tools_enabled());
    }

    #[test]
    fn test_temperature_clamped() {
        let req = CompletionRequest::prompt("x").with_temperature(5.0);
        assert_eq!(req.temperature, Some(2.0));
    }

    #[test]
    fn test_tool_call_accessors() {
        let call = ToolCall::new(
            "currency_converter",
            json!({"amount": 100.0, "from_currency": "USD"}),
        );

        assert_eq!(call.get_f64("amount"), Some(100.0));
        assert_eq!(call.get_str("from_currency"), Some("USD"));
        assert_eq!(call.get_str("missing"), None);
    }

    #[test]
    fn test_response_tool_call() {
        let response =
            GenerateResponse::tool_call(ToolCall::new("get_current_time", json!({})));
        assert!(response.has_tool_call());
        assert_eq!(response.finish_reason, FinishReason::ToolCall);
    }
}
