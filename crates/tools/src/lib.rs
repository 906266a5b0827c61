//! Tool layer for the BizzHub agent
//!
//! A `Tool` trait, a registry with in-band error reporting, and the
//! built-in tools: currency conversion, current time, and a whitelisted
//! arithmetic evaluator.

pub mod builtin;
pub mod calc;
pub mod currency;
pub mod registry;
pub mod tool;

pub use builtin::{default_registry, CalculateTool, CurrencyConverterTool, CurrentTimeTool};
pub use currency::{CurrencyRateClient, RateError};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolOutput};

use thiserror::Error;

/// Tool execution errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Execution failed: {0}")]
    Execution(String),

    #[error(transparent)]
    Rate(#[from] RateError),
}

impl From<ToolError> for bizzhub_core::Error {
    fn from(err: ToolError) -> Self {
        bizzhub_core::Error::Tool(err.to_string())
    }
}
