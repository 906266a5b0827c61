//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// LLM provider configuration
    #[serde(default)]
    pub providers: ProviderSettings,

    /// FAQ retrieval configuration
    #[serde(default)]
    pub rag: RagSettings,

    /// Currency conversion configuration
    #[serde(default)]
    pub currency: CurrencySettings,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_rag()?;
        self.validate_currency()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    fn validate_rag(&self) -> Result<(), ConfigError> {
        let rag = &self.rag;

        if !(0.0..=1.0).contains(&rag.accept_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "rag.accept_threshold".to_string(),
                message: format!("Must be between 0.0 and 1.0, got {}", rag.accept_threshold),
            });
        }

        if !(0.0..=1.0).contains(&rag.candidate_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "rag.candidate_threshold".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    rag.candidate_threshold
                ),
            });
        }

        if rag.candidate_threshold > rag.accept_threshold {
            return Err(ConfigError::InvalidValue {
                field: "rag.candidate_threshold".to_string(),
                message: format!(
                    "Cannot exceed accept_threshold ({})",
                    rag.accept_threshold
                ),
            });
        }

        if rag.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rag.top_k".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if rag.max_features == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rag.max_features".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    fn validate_currency(&self) -> Result<(), ConfigError> {
        if self.currency.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "currency.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if !self.currency.base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue {
                field: "currency.base_url".to_string(),
                message: format!("Not a valid URL: {}", self.currency.base_url),
            });
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_server_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_server_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_server_timeout(),
            cors_enabled: true,
        }
    }
}

/// LLM provider configuration
///
/// A provider is considered configured when its API key is present.
/// Providers are tried in priority order: Gemini first, then OpenAI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Gemini API key (set via BIZZHUB__PROVIDERS__GEMINI_API_KEY)
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Gemini API endpoint
    #[serde(default = "default_gemini_endpoint")]
    pub gemini_endpoint: String,

    /// OpenAI API key (set via BIZZHUB__PROVIDERS__OPENAI_API_KEY)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// OpenAI API endpoint
    #[serde(default = "default_openai_endpoint")]
    pub openai_endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,

    /// Default max tokens for completions
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_provider_timeout() -> u64 {
    30
}
fn default_max_tokens() -> u32 {
    1024
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_model: default_gemini_model(),
            gemini_endpoint: default_gemini_endpoint(),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: default_openai_model(),
            openai_endpoint: default_openai_endpoint(),
            timeout_seconds: default_provider_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// FAQ retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagSettings {
    /// Similarity at or above which a retrieved FAQ answer is returned directly
    #[serde(default = "default_accept_threshold")]
    pub accept_threshold: f64,

    /// Similarity at or above which a FAQ is offered as LLM context
    #[serde(default = "default_candidate_threshold")]
    pub candidate_threshold: f64,

    /// Number of FAQ entries retrieved per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Vocabulary cap for the TF-IDF index
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

fn default_accept_threshold() -> f64 {
    0.3
}
fn default_candidate_threshold() -> f64 {
    0.1
}
fn default_top_k() -> usize {
    2
}
fn default_max_features() -> usize {
    10000
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            accept_threshold: default_accept_threshold(),
            candidate_threshold: default_candidate_threshold(),
            top_k: default_top_k(),
            max_features: default_max_features(),
        }
    }
}

/// Currency conversion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// Exchange rate API base URL (base currency code is appended)
    #[serde(default = "default_currency_base_url")]
    pub base_url: String,

    /// Rate cache time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,

    /// HTTP timeout in seconds
    #[serde(default = "default_currency_timeout")]
    pub timeout_seconds: u64,
}

fn default_currency_base_url() -> String {
    "https://api.exchangerate-api.com/v4/latest/".to_string()
}
fn default_cache_ttl() -> u64 {
    1800
}
fn default_currency_timeout() -> u64 {
    10
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            base_url: default_currency_base_url(),
            cache_ttl_seconds: default_cache_ttl(),
            timeout_seconds: default_currency_timeout(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (BIZZHUB__ prefix, __ separator)
/// 2. config/{env} (if env specified)
/// 3. config/default
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));
    debug!("layered config source: config/default");

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
        debug!(env = env_name, "layered config source: config/{env_name}");
    }

    builder = builder.add_source(
        Environment::with_prefix("BIZZHUB")
            .separator("__")
            .try_parsing(true),
    );
    debug!("layered config source: BIZZHUB__ environment overrides");

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    debug!(
        host = %settings.server.host,
        port = settings.server.port,
        "settings loaded"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.rag.accept_threshold, 0.3);
        assert_eq!(settings.rag.candidate_threshold, 0.1);
        assert_eq!(settings.rag.top_k, 2);
        assert_eq!(settings.currency.cache_ttl_seconds, 1800);
    }

    #[test]
    fn test_load_settings_without_files() {
        // No config/ directory under the crate root; every source is
        // optional, so defaults apply
        let settings = load_settings(None).expect("load");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.rag.top_k, 2);
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();

        settings.server.port = 0;
        assert!(settings.validate().is_err());
        settings.server.port = 8080;

        settings.server.timeout_seconds = 0;
        assert!(settings.validate().is_err());
        settings.server.timeout_seconds = 30;

        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rag_validation() {
        let mut settings = Settings::default();

        settings.rag.accept_threshold = 1.5;
        assert!(settings.validate().is_err());
        settings.rag.accept_threshold = 0.3;

        // Candidate threshold above accept threshold is inconsistent
        settings.rag.candidate_threshold = 0.5;
        assert!(settings.validate().is_err());
        settings.rag.candidate_threshold = 0.1;

        settings.rag.top_k = 0;
        assert!(settings.validate().is_err());
        settings.rag.top_k = 2;

        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_currency_validation() {
        let mut settings = Settings::default();

        settings.currency.base_url = "not-a-url".to_string();
        assert!(settings.validate().is_err());
        settings.currency.base_url = default_currency_base_url();

        settings.currency.timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }
}
