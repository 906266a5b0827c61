//! Top-level error type
//!
//! Crates that can fail define their own error enum (thiserror) and
//! convert into this one at the crate boundary.

use thiserror::Error;

/// Result alias using the shared error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced across crate boundaries
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tool error: {0}")]
    Tool(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_converts() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
