//! HTTP surface
//!
//! Thin collaborator over the agent: one chat endpoint and a health
//! probe. No logic lives here.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use bizzhub_agent::ConversationAgent;
use bizzhub_config::ServerSettings;
use bizzhub_llm::LlmOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ConversationAgent>,
    pub orchestrator: Arc<LlmOrchestrator>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub answer: String,
    pub response_type: String,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct HealthReply {
    pub status: &'static str,
    pub providers: HashMap<String, bool>,
}

pub fn router(state: AppState, settings: &ServerSettings) -> Router {
    let mut router = Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.timeout_seconds,
        )))
        .with_state(state);

    if settings.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let resolution = state.agent.resolve(&request.message).await;
    Ok(Json(ChatReply {
        answer: resolution.answer,
        response_type: resolution.response_type,
        confidence: resolution.confidence,
    }))
}

async fn health(State(state): State<AppState>) -> Json<HealthReply> {
    Json(HealthReply {
        status: "ok",
        providers: state.orchestrator.health_check().await,
    })
}
