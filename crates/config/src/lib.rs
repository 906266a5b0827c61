//! Configuration for the BizzHub conversational agent
//!
//! Settings are loaded from `config/default` (any format the config
//! crate understands), an optional environment-specific file, and
//! finally `BIZZHUB__` prefixed environment variables.

mod settings;

pub use settings::{
    load_settings, CurrencySettings, ProviderSettings, RagSettings, ServerSettings, Settings,
};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<ConfigError> for bizzhub_core::Error {
    fn from(err: ConfigError) -> Self {
        bizzhub_core::Error::Config(err.to_string())
    }
}
