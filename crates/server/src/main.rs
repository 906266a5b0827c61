//! BizzHub conversational agent server

mod http;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bizzhub_agent::ConversationAgent;
use bizzhub_config::load_settings;
use bizzhub_llm::LlmOrchestrator;
use bizzhub_rag::FaqRetriever;
use bizzhub_tools::{default_registry, CurrencyRateClient};

use crate::http::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let env = std::env::var("BIZZHUB_ENV").ok();
    let settings = load_settings(env.as_deref())?;

    let currency_client = Arc::new(CurrencyRateClient::new(
        &settings.currency.base_url,
        Duration::from_secs(settings.currency.timeout_seconds),
        Duration::from_secs(settings.currency.cache_ttl_seconds),
    )?);
    let registry = Arc::new(default_registry(currency_client));

    let orchestrator = Arc::new(LlmOrchestrator::from_settings(&settings.providers, registry));
    let retriever = Arc::new(
        FaqRetriever::new(settings.rag.clone()).with_orchestrator(orchestrator.clone()),
    );
    let agent = Arc::new(ConversationAgent::new(retriever, orchestrator.clone()));

    let app = router(
        AppState {
            agent,
            orchestrator,
        },
        &settings.server,
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
