//! LLM provider orchestration
//!
//! REST backends for Gemini and OpenAI behind a common trait, and an
//! orchestrator that handles provider fallback and the tool-call
//! execution loop. Callers never see a transport error; exhaustion
//! yields a deterministic safety-net reply.

pub mod backend;
pub mod orchestrator;

pub use backend::{GeminiBackend, OpenAiBackend, ProviderBackend};
pub use orchestrator::{LlmOrchestrator, OrchestratorReply, ToolInvocation, FALLBACK_PROVIDER};

use thiserror::Error;

/// Provider call failures. These stay inside the orchestrator; they
/// only ever trigger fallback to the next provider.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<LlmError> for bizzhub_core::Error {
    fn from(err: LlmError) -> Self {
        bizzhub_core::Error::Llm(err.to_string())
    }
}
