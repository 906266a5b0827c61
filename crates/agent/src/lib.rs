//! Conversation agent façade
//!
//! Wires the deterministic pipeline, the FAQ retriever, and the LLM
//! orchestrator behind a single `resolve` call, and keeps the
//! append-only conversation log.

mod agent;

pub use agent::{ConversationAgent, Resolution};
