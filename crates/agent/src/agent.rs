//! Query resolution

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use bizzhub_core::Turn;
use bizzhub_knowledge::{IntentCategory, IntentParser, KnowledgeBase, ResponseGenerator};
use bizzhub_llm::{LlmOrchestrator, FALLBACK_PROVIDER};
use bizzhub_rag::FaqRetriever;

/// Number of recent turns folded into the FAQ rephrasing context
const CONTEXT_TURNS: usize = 6;

/// Confidence reported for LLM-produced answers
const LLM_CONFIDENCE: f64 = 0.8;
/// Confidence reported for the orchestrator safety-net reply
const SAFETY_NET_CONFIDENCE: f64 = 0.3;

/// Outcome of resolving one question
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub answer: String,
    /// Where the answer came from: "knowledge_base",
    /// "general_knowledge", "faq", or a provider name
    pub response_type: String,
    pub confidence: f64,
}

/// Customer-facing conversational agent for BizzHub Workspaces
pub struct ConversationAgent {
    parser: IntentParser,
    generator: ResponseGenerator,
    retriever: Arc<FaqRetriever>,
    orchestrator: Arc<LlmOrchestrator>,
    history: RwLock<Vec<Turn>>,
}

impl ConversationAgent {
    pub fn new(retriever: Arc<FaqRetriever>, orchestrator: Arc<LlmOrchestrator>) -> Self {
        Self {
            parser: IntentParser::new(),
            generator: ResponseGenerator::new(KnowledgeBase::new()),
            retriever,
            orchestrator,
            history: RwLock::new(Vec::new()),
        }
    }

    /// Resolve a question. Every question gets an answer; the worst
    /// case is the orchestrator's safety-net reply.
    pub async fn resolve(&self, question: &str) -> Resolution {
        self.history.write().push(Turn::user(question));

        let intent = self.parser.parse(question);
        debug!(category = intent.category.as_str(), entity = ?intent.entity, "parsed intent");

        let resolution = if intent.category == IntentCategory::General {
            self.resolve_general(question).await
        } else {
            let response = self.generator.generate(&intent, question);
            Resolution {
                answer: response.answer,
                response_type: response.source,
                confidence: response.confidence,
            }
        };

        info!(
            response_type = %resolution.response_type,
            confidence = resolution.confidence,
            "question resolved"
        );
        self.history
            .write()
            .push(Turn::assistant(resolution.answer.clone()));
        resolution
    }

    /// No deterministic knowledge applies: FAQ first, then the
    /// orchestrator, then the welcome template when no provider is
    /// configured at all.
    async fn resolve_general(&self, question: &str) -> Resolution {
        if let Some(matched) = self.retriever.answer(question) {
            let context = self.recent_context();
            let answer = self
                .retriever
                .contextual_answer(question, &context)
                .await
                .unwrap_or(matched.answer);
            return Resolution {
                answer,
                response_type: "faq".to_string(),
                confidence: matched.score.min(1.0),
            };
        }

        if self.orchestrator.providers().is_empty() {
            let intent = self.parser.parse(question);
            let response = self.generator.generate(&intent, question);
            return Resolution {
                answer: response.answer,
                response_type: response.source,
                confidence: response.confidence,
            };
        }

        let reply = self.orchestrator.generate(question, true).await;
        let confidence = if reply.provider == FALLBACK_PROVIDER {
            SAFETY_NET_CONFIDENCE
        } else {
            LLM_CONFIDENCE
        };
        Resolution {
            answer: reply.content,
            response_type: reply.provider,
            confidence,
        }
    }

    /// Conversation log, oldest first
    pub fn history(&self) -> Vec<Turn> {
        self.history.read().clone()
    }

    fn recent_context(&self) -> String {
        let history = self.history.read();
        let start = history.len().saturating_sub(CONTEXT_TURNS);
        history[start..]
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
