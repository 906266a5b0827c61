//! End-to-end resolution scenarios
//!
//! Built without any LLM provider configured, so everything that can
//! be answered deterministically or from the FAQ corpus must be, and
//! everything else lands on the welcome template.

use std::sync::Arc;
use std::time::Duration;

use bizzhub_agent::ConversationAgent;
use bizzhub_config::{ProviderSettings, RagSettings};
use bizzhub_core::TurnRole;
use bizzhub_llm::LlmOrchestrator;
use bizzhub_rag::FaqRetriever;
use bizzhub_tools::{default_registry, CurrencyRateClient};

fn agent() -> ConversationAgent {
    let client = Arc::new(
        CurrencyRateClient::new(
            "https://api.exchangerate-api.com/v4/latest/",
            Duration::from_secs(10),
            Duration::from_secs(1800),
        )
        .expect("currency client"),
    );
    let registry = Arc::new(default_registry(client));

    let providers = ProviderSettings {
        gemini_api_key: None,
        openai_api_key: None,
        ..ProviderSettings::default()
    };
    let orchestrator = Arc::new(LlmOrchestrator::from_settings(&providers, registry));
    let retriever = Arc::new(
        FaqRetriever::new(RagSettings::default()).with_orchestrator(orchestrator.clone()),
    );

    ConversationAgent::new(retriever, orchestrator)
}

#[tokio::test]
async fn per_seat_cost_is_answered_from_knowledge() {
    let agent = agent();
    let resolution = agent.resolve("What's the per seat cost?").await;

    assert_eq!(resolution.response_type, "knowledge_base");
    assert_eq!(resolution.confidence, 0.95);
    assert!(resolution.answer.contains("Co-Working Space Pricing"));
    assert!(resolution.answer.contains("₹8,000 - ₹12,000"));
}

#[tokio::test]
async fn electronic_city_location_has_address_and_phone() {
    let agent = agent();
    let resolution = agent
        .resolve("Where is your Electronic City center?")
        .await;

    assert_eq!(resolution.response_type, "knowledge_base");
    assert_eq!(resolution.confidence, 0.95);
    assert!(resolution
        .answer
        .contains("Phase 1, Near Infosys, Electronic City"));
    assert!(resolution.answer.contains("080-4111-4444"));
}

#[tokio::test]
async fn invoice_question_is_answered_from_faq() {
    let agent = agent();
    let resolution = agent.resolve("How do I create an invoice?").await;

    assert_eq!(resolution.response_type, "faq");
    assert!(resolution.confidence > 0.3);
    assert!(resolution.answer.contains("2x T-shirts"));
}

#[tokio::test]
async fn unmatched_general_question_gets_welcome() {
    let agent = agent();
    let resolution = agent.resolve("Tell me something nice").await;

    assert_eq!(resolution.response_type, "general_knowledge");
    assert_eq!(resolution.confidence, 0.7);
    assert!(resolution.answer.contains("Welcome to BizzHub"));
}

#[tokio::test]
async fn history_is_append_only_and_ordered() {
    let agent = agent();
    agent.resolve("What's the per seat cost?").await;
    agent.resolve("Do you have parking at Whitefield?").await;

    let history = agent.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].role, TurnRole::User);
    assert_eq!(history[1].role, TurnRole::Assistant);
    assert_eq!(history[2].role, TurnRole::User);
    assert_eq!(history[2].content, "Do you have parking at Whitefield?");
}
