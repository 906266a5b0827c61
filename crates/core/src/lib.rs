//! Core types for the BizzHub conversational agent
//!
//! This crate provides foundational types used across all other crates:
//! - LLM request/response types (messages, tool definitions, tool calls)
//! - Conversation turn types
//! - Invoice structures handed to the document renderer
//! - Error types

pub mod conversation;
pub mod error;
pub mod invoice;
pub mod llm_types;

pub use conversation::{Turn, TurnRole};
pub use error::{Error, Result};
pub use invoice::{Invoice, InvoiceItem};
pub use llm_types::{
    CompletionRequest, FinishReason, GenerateResponse, Message, Role, ToolCall, ToolDefinition,
};
