//! Provider backends
//!
//! Each backend hides its provider's tool-call convention behind the
//! same interface: OpenAI uses native function calling, Gemini uses a
//! prompt-engineered JSON emission convention. The orchestrator never
//! needs to know which is which.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use bizzhub_core::{CompletionRequest, GenerateResponse, Message, Role, ToolCall};

use crate::LlmError;

/// A single LLM provider
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    /// Provider name as reported in replies
    fn name(&self) -> &str;

    /// One completion call
    async fn complete(&self, request: &CompletionRequest) -> Result<GenerateResponse, LlmError>;

    /// Re-query after a tool has been executed. The default folds the
    /// tool result into a follow-up prompt; providers with native tool
    /// protocols override this.
    async fn follow_up(
        &self,
        request: &CompletionRequest,
        call: &ToolCall,
        result: &str,
    ) -> Result<GenerateResponse, LlmError> {
        let prompt = user_prompt(request);
        let follow = format!(
            "{}\n\nTool '{}' was called with arguments {} and returned: {}. \
             Provide the final answer based on this information.",
            prompt, call.name, call.arguments, result,
        );
        self.complete(&CompletionRequest::prompt(follow)).await
    }
}

fn user_prompt(request: &CompletionRequest) -> String {
    request
        .messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

// Matches the prompt-engineered tool convention:
// {"tool": "name", "arguments": {...}}
static TOOL_EMISSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{"tool":\s*"([^"]+)"(?:,\s*"arguments":\s*(\{[^}]*\}))?\}"#)
        .expect("tool emission regex")
});

/// Gemini REST backend. Tool calling is prompt-engineered: tool
/// definitions are folded into the prompt and emissions are parsed out
/// of the reply text.
pub struct GeminiBackend {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiBackend {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    fn enhanced_prompt(&self, request: &CompletionRequest) -> String {
        let prompt = user_prompt(request);
        if !request.tools_enabled() {
            return prompt;
        }

        let names: Vec<&str> = request.tools.iter().map(|t| t.name.as_str()).collect();
        format!(
            "{}\n\nAvailable tools: {}. If you need to use any of these tools, \
             respond with the tool name and arguments in JSON format: \
             {{\"tool\": \"tool_name\", \"arguments\": {{...}}}}",
            prompt,
            names.join(", "),
        )
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[async_trait]
impl ProviderBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<GenerateResponse, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key,
        );

        let mut generation_config = json!({});
        if let Some(max_tokens) = request.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            generation_config["temperature"] = json!(temperature);
        }

        let body = json!({
            "contents": [{"parts": [{"text": self.enhanced_prompt(request)}]}],
            "generationConfig": generation_config,
        });

        debug!(model = %self.model, "calling gemini");
        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let text = parsed
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .ok_or(LlmError::EmptyResponse)?;

        if request.tools_enabled() {
            if let Some(captures) = TOOL_EMISSION.captures(&text) {
                let name = captures[1].to_string();
                let arguments: Value = captures
                    .get(2)
                    .and_then(|m| serde_json::from_str(m.as_str()).ok())
                    .unwrap_or_else(|| json!({}));
                return Ok(GenerateResponse::tool_call(ToolCall::new(name, arguments)));
            }
        }

        Ok(GenerateResponse::text(text))
    }
}

/// OpenAI chat completions backend with native function calling
pub struct OpenAiBackend {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiBackend {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    fn wire_messages(request: &CompletionRequest) -> Vec<Value> {
        request
            .messages
            .iter()
            .map(|m| match &m.tool_call_id {
                Some(id) => json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                    "tool_call_id": id,
                }),
                None => json!({"role": m.role.as_str(), "content": m.content}),
            })
            .collect()
    }

    async fn call(&self, body: Value) -> Result<ChatCompletionResponse, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);

        debug!(model = %self.model, "calling openai");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunction,
}

#[derive(Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

#[async_trait]
impl ProviderBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<GenerateResponse, LlmError> {
        let mut body = json!({
            "model": self.model,
            "messages": Self::wire_messages(request),
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        if request.tools_enabled() {
            let tools: Vec<Value> = request
                .tools
                .iter()
                .map(|t| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            body["tools"] = json!(tools);
            body["tool_choice"] = json!("auto");
        }

        let parsed = self.call(body).await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        if let Some(call) = choice.message.tool_calls.and_then(|mut c| c.drain(..).next()) {
            let arguments: Value = serde_json::from_str(&call.function.arguments)
                .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
            return Ok(GenerateResponse::tool_call(ToolCall {
                id: Some(call.id),
                name: call.function.name,
                arguments,
            }));
        }

        let text = choice.message.content.ok_or(LlmError::EmptyResponse)?;
        Ok(GenerateResponse::text(text))
    }

    async fn follow_up(
        &self,
        request: &CompletionRequest,
        call: &ToolCall,
        result: &str,
    ) -> Result<GenerateResponse, LlmError> {
        let call_id = call.id.clone().unwrap_or_else(|| "call_0".to_string());

        let mut messages = Self::wire_messages(request);
        messages.push(json!({
            "role": "assistant",
            "content": Value::Null,
            "tool_calls": [{
                "id": call_id,
                "type": "function",
                "function": {
                    "name": call.name,
                    "arguments": call.arguments.to_string(),
                }
            }]
        }));
        let tool_message = Message::tool(result, call_id);
        messages.push(json!({
            "role": tool_message.role.as_str(),
            "content": tool_message.content,
            "tool_call_id": tool_message.tool_call_id,
        }));

        let body = json!({
            "model": self.model,
            "messages": messages,
        });

        let parsed = self.call(body).await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)?;
        Ok(GenerateResponse::text(text))
    }
}
