//! Provider orchestration
//!
//! Providers are tried in a fixed priority order decided at startup
//! from configured credentials. A provider failure moves on to the
//! next; exhaustion produces a deterministic safety-net reply, so
//! `generate` is infallible from the caller's point of view.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use bizzhub_config::ProviderSettings;
use bizzhub_core::CompletionRequest;
use bizzhub_tools::ToolRegistry;

use crate::backend::{GeminiBackend, OpenAiBackend, ProviderBackend};
use crate::LlmError;

/// Provider name reported when every configured provider failed
pub const FALLBACK_PROVIDER: &str = "fallback";

const HEALTH_PROMPT: &str = "Say 'health check' in one word";

/// Record of a tool executed during a call
#[derive(Debug, Clone, Serialize)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Value,
    pub result: String,
}

/// Reply from the orchestrator
#[derive(Debug, Clone, Serialize)]
pub struct OrchestratorReply {
    pub content: String,
    pub tool_calls: Vec<ToolInvocation>,
    pub provider: String,
}

/// Multi-provider LLM front end with tool execution
pub struct LlmOrchestrator {
    backends: Vec<Arc<dyn ProviderBackend>>,
    registry: Arc<ToolRegistry>,
    max_tokens: u32,
}

impl LlmOrchestrator {
    pub fn new(backends: Vec<Arc<dyn ProviderBackend>>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            backends,
            registry,
            max_tokens: 1024,
        }
    }

    /// Build backends from configured credentials, Gemini first
    pub fn from_settings(settings: &ProviderSettings, registry: Arc<ToolRegistry>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .unwrap_or_default();

        let mut backends: Vec<Arc<dyn ProviderBackend>> = Vec::new();
        if let Some(key) = &settings.gemini_api_key {
            backends.push(Arc::new(GeminiBackend::new(
                http.clone(),
                key,
                &settings.gemini_model,
                &settings.gemini_endpoint,
            )));
        }
        if let Some(key) = &settings.openai_api_key {
            backends.push(Arc::new(OpenAiBackend::new(
                http,
                key,
                &settings.openai_model,
                &settings.openai_endpoint,
            )));
        }

        if backends.is_empty() {
            warn!("no LLM providers configured, replies will use the safety net");
        } else {
            info!(
                providers = ?backends.iter().map(|b| b.name()).collect::<Vec<_>>(),
                "LLM providers configured"
            );
        }

        Self {
            backends,
            registry,
            max_tokens: settings.max_tokens,
        }
    }

    /// Configured provider names in priority order
    pub fn providers(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Generate a reply, never an error
    pub async fn generate(&self, prompt: &str, use_tools: bool) -> OrchestratorReply {
        for backend in &self.backends {
            match self.try_backend(backend.as_ref(), prompt, use_tools).await {
                Ok(reply) => return reply,
                Err(err) => {
                    warn!(provider = backend.name(), error = %err, "provider call failed");
                }
            }
        }

        let prefix: String = prompt.chars().take(100).collect();
        OrchestratorReply {
            content: format!(
                "I'm sorry, but I couldn't process your request. The input was: {}...",
                prefix,
            ),
            tool_calls: Vec::new(),
            provider: FALLBACK_PROVIDER.to_string(),
        }
    }

    async fn try_backend(
        &self,
        backend: &dyn ProviderBackend,
        prompt: &str,
        use_tools: bool,
    ) -> Result<OrchestratorReply, LlmError> {
        let mut request = CompletionRequest::prompt(prompt).with_max_tokens(self.max_tokens);
        if use_tools {
            request = request.with_tools(self.registry.definitions());
        }

        let response = backend.complete(&request).await?;

        let Some(call) = response.tool_call else {
            if response.text.trim().is_empty() {
                return Err(LlmError::EmptyResponse);
            }
            return Ok(OrchestratorReply {
                content: response.text,
                tool_calls: Vec::new(),
                provider: backend.name().to_string(),
            });
        };

        // Execute the tool and re-query the same provider with the result
        let output = self.registry.execute(&call.name, call.arguments.clone()).await;
        let second = backend.follow_up(&request, &call, &output.content).await?;
        if second.text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(OrchestratorReply {
            content: second.text,
            tool_calls: vec![ToolInvocation {
                name: call.name,
                arguments: call.arguments,
                result: output.content,
            }],
            provider: backend.name().to_string(),
        })
    }

    /// Probe each configured provider with a canary prompt. Does not
    /// affect provider selection.
    pub async fn health_check(&self) -> HashMap<String, bool> {
        let mut status = HashMap::new();
        for backend in &self.backends {
            let request = CompletionRequest::prompt(HEALTH_PROMPT).with_max_tokens(5);
            let healthy = backend.complete(&request).await.is_ok();
            if !healthy {
                warn!(provider = backend.name(), "health check failed");
            }
            status.insert(backend.name().to_string(), healthy);
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use bizzhub_core::{GenerateResponse, ToolCall};
    use bizzhub_tools::CalculateTool;

    struct MockBackend {
        name: &'static str,
        fail: bool,
        reply: &'static str,
        request_tool: Option<&'static str>,
    }

    impl MockBackend {
        fn ok(name: &'static str, reply: &'static str) -> Self {
            Self {
                name,
                fail: false,
                reply,
                request_tool: None,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                fail: true,
                reply: "",
                request_tool: None,
            }
        }
    }

    #[async_trait]
    impl ProviderBackend for MockBackend {
        fn name(&self) -> &str {
            self.name
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<GenerateResponse, LlmError> {
            if self.fail {
                return Err(LlmError::EmptyResponse);
            }
            if let Some(tool) = self.request_tool {
                if request.tools_enabled() {
                    return Ok(GenerateResponse::tool_call(ToolCall::new(
                        tool,
                        json!({"expression": "2+2*5"}),
                    )));
                }
            }
            Ok(GenerateResponse::text(self.reply))
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(CalculateTool));
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_first_provider_wins() {
        let orchestrator = LlmOrchestrator::new(
            vec![
                Arc::new(MockBackend::ok("alpha", "from alpha")),
                Arc::new(MockBackend::ok("beta", "from beta")),
            ],
            registry(),
        );

        let reply = orchestrator.generate("hello", false).await;
        assert_eq!(reply.provider, "alpha");
        assert_eq!(reply.content, "from alpha");
    }

    #[tokio::test]
    async fn test_fallback_to_next_provider() {
        let orchestrator = LlmOrchestrator::new(
            vec![
                Arc::new(MockBackend::failing("alpha")),
                Arc::new(MockBackend::ok("beta", "from beta")),
            ],
            registry(),
        );

        let reply = orchestrator.generate("hello", false).await;
        assert_eq!(reply.provider, "beta");
        assert!(reply.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn test_safety_net_when_exhausted() {
        let orchestrator =
            LlmOrchestrator::new(vec![Arc::new(MockBackend::failing("alpha"))], registry());

        let long_prompt = "x".repeat(250);
        let reply = orchestrator.generate(&long_prompt, false).await;
        assert_eq!(reply.provider, FALLBACK_PROVIDER);
        // Echo carries only the first 100 characters of the prompt
        assert!(reply.content.contains(&"x".repeat(100)));
        assert!(!reply.content.contains(&"x".repeat(101)));
    }

    #[tokio::test]
    async fn test_safety_net_with_no_providers() {
        let orchestrator = LlmOrchestrator::new(Vec::new(), registry());
        let reply = orchestrator.generate("anyone there?", true).await;
        assert_eq!(reply.provider, FALLBACK_PROVIDER);
    }

    #[tokio::test]
    async fn test_tool_loop_records_invocation() {
        let orchestrator = LlmOrchestrator::new(
            vec![Arc::new(MockBackend {
                name: "alpha",
                fail: false,
                reply: "The answer is 12.",
                request_tool: Some("calculate"),
            })],
            registry(),
        );

        let reply = orchestrator.generate("what is 2+2*5?", true).await;
        assert_eq!(reply.provider, "alpha");
        assert_eq!(reply.tool_calls.len(), 1);
        assert_eq!(reply.tool_calls[0].name, "calculate");
        assert_eq!(reply.tool_calls[0].result, "12");
        assert_eq!(reply.content, "The answer is 12.");
    }

    #[tokio::test]
    async fn test_health_check_reports_per_provider() {
        let orchestrator = LlmOrchestrator::new(
            vec![
                Arc::new(MockBackend::ok("alpha", "ok")),
                Arc::new(MockBackend::failing("beta")),
            ],
            registry(),
        );

        let status = orchestrator.health_check().await;
        assert_eq!(status.get("alpha"), Some(&true));
        assert_eq!(status.get("beta"), Some(&false));
    }
}
