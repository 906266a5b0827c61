//! FAQ retriever
//!
//! Holds the FAQ corpus and its TF-IDF index behind a single RwLock.
//! Additions rebuild the whole index under the write lock, so readers
//! never observe a partial index.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bizzhub_config::RagSettings;
use bizzhub_llm::LlmOrchestrator;

use crate::tfidf::TfIdfIndex;

/// A single FAQ entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl FaqEntry {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
        }
    }
}

/// A retrieval hit above the acceptance threshold
#[derive(Debug, Clone, Serialize)]
pub struct FaqMatch {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub score: f64,
}

struct Corpus {
    entries: Vec<FaqEntry>,
    index: TfIdfIndex,
}

impl Corpus {
    fn rebuild(&mut self, max_features: usize) {
        let questions: Vec<&str> = self.entries.iter().map(|e| e.question.as_str()).collect();
        self.index = TfIdfIndex::build(&questions, max_features);
    }
}

/// TF-IDF FAQ retrieval with optional LLM rephrasing
pub struct FaqRetriever {
    settings: RagSettings,
    corpus: RwLock<Corpus>,
    orchestrator: Option<Arc<LlmOrchestrator>>,
}

impl FaqRetriever {
    /// Build a retriever over the default FAQ corpus
    pub fn new(settings: RagSettings) -> Self {
        let mut corpus = Corpus {
            entries: default_faqs(),
            index: TfIdfIndex::default(),
        };
        corpus.rebuild(settings.max_features);

        Self {
            settings,
            corpus: RwLock::new(corpus),
            orchestrator: None,
        }
    }

    /// Attach an orchestrator used by `contextual_answer`
    pub fn with_orchestrator(mut self, orchestrator: Arc<LlmOrchestrator>) -> Self {
        self.orchestrator = Some(orchestrator);
        self
    }

    /// Append an entry and rebuild the index
    pub fn add_faq(
        &self,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) {
        let mut corpus = self.corpus.write();
        corpus.entries.push(FaqEntry::new(question, answer, category));
        corpus.rebuild(self.settings.max_features);
    }

    /// Best FAQ match above the acceptance threshold, if any
    pub fn answer(&self, query: &str) -> Option<FaqMatch> {
        if query.trim().is_empty() {
            return None;
        }

        let corpus = self.corpus.read();
        if corpus.index.is_empty() {
            return None;
        }

        let similarities = corpus.index.similarities(query);
        let mut ranked: Vec<(usize, f64)> = similarities
            .into_iter()
            .enumerate()
            .filter(|(_, score)| *score > self.settings.candidate_threshold)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(self.settings.top_k);

        let (best_idx, best_score) = *ranked.first()?;
        if best_score <= self.settings.accept_threshold {
            debug!(score = best_score, "FAQ candidate below acceptance threshold");
            return None;
        }

        let entry = &corpus.entries[best_idx];
        Some(FaqMatch {
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            category: entry.category.clone(),
            score: best_score,
        })
    }

    /// Matched FAQ answer, rephrased for the query by the orchestrator
    /// when one is attached. Any rephrasing failure falls back to the
    /// raw FAQ answer.
    pub async fn contextual_answer(&self, query: &str, context: &str) -> Option<String> {
        let matched = self.answer(query)?;

        let Some(orchestrator) = &self.orchestrator else {
            return Some(matched.answer);
        };

        let prompt = format!(
            "You are an assistant for a workspace rental service.\n\
             Based on the user's query and the FAQ answer below, provide a helpful response.\n\n\
             User Query: {}\n\n\
             FAQ Answer: {}\n\n\
             Conversation Context: {}\n\n\
             Provide a helpful, concise response that addresses the user's specific query. \
             If the FAQ doesn't fully address the query, acknowledge the limitation and \
             offer assistance.",
            query, matched.answer, context,
        );

        let reply = orchestrator.generate(&prompt, false).await;
        if reply.provider == bizzhub_llm::FALLBACK_PROVIDER {
            // No provider produced a real completion
            return Some(matched.answer);
        }
        Some(reply.content)
    }

    /// All entries in the given category
    pub fn faqs_by_category(&self, category: &str) -> Vec<FaqEntry> {
        self.corpus
            .read()
            .entries
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }

    /// Distinct categories, in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let corpus = self.corpus.read();
        let mut seen = Vec::new();
        for entry in &corpus.entries {
            if !seen.contains(&entry.category) {
                seen.push(entry.category.clone());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.corpus.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.read().entries.is_empty()
    }
}

/// Default corpus for the invoice assistant
fn default_faqs() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "How do I create an invoice?",
            "You can create an invoice by providing product details like quantity and price. \
             For example: '2x T-shirts @ 500' creates an invoice with 2 T-shirts at Rs. 500 each.",
            "billing",
        ),
        FaqEntry::new(
            "What information do I need for an invoice?",
            "You need at least one product item, customer name, and customer email. \
             Additional details like GST number, shipping fee, and discount codes can be added.",
            "billing",
        ),
        FaqEntry::new(
            "How do I add items to my invoice?",
            "You can add items by mentioning quantity, name, and price. \
             Examples: '3 shirts @ 499', '1 laptop 12999', '2 books at 299 each'.",
            "billing",
        ),
        FaqEntry::new(
            "Can I update my invoice after creation?",
            "Yes, you can continue adding items or updating details in the same conversation. \
             The system remembers your invoice draft until it's finalized.",
            "billing",
        ),
        FaqEntry::new(
            "How do I download my invoice as PDF?",
            "Once your invoice is generated, you'll see a download link in the chat interface. \
             The PDF is automatically created when your invoice is finalized.",
            "pdf",
        ),
        FaqEntry::new(
            "What is GST and how is it calculated?",
            "GST (Goods and Services Tax) is calculated as a percentage of the subtotal. \
             By default, it's set to 18%, but you can specify a different rate.",
            "tax",
        ),
        FaqEntry::new(
            "Can I apply discounts to my invoice?",
            "Yes, you can apply discounts by mentioning a discount code or amount. \
             Examples: 'Apply 10% discount', 'Use code SAVE10', 'Discount of 500'.",
            "billing",
        ),
        FaqEntry::new(
            "How do I include shipping charges?",
            "Shipping charges are automatically added to your invoice. \
             You can specify shipping fees like: 'Shipping: 100' or 'Delivery charge: 50'.",
            "billing",
        ),
        FaqEntry::new(
            "What payment methods do you accept?",
            "This system generates invoices for your records. \
             Actual payment methods depend on the merchant you're purchasing from.",
            "payment",
        ),
        FaqEntry::new(
            "How do I cancel my invoice?",
            "Invoices are generated only when complete. \
             If you want to start fresh, just begin a new conversation or say 'reset'.",
            "billing",
        ),
        FaqEntry::new(
            "Can I send the invoice to someone else?",
            "Yes, once generated, you can download the PDF and share it. \
             The system also stores invoices by ID for future reference.",
            "pdf",
        ),
        FaqEntry::new(
            "How long are my invoices stored?",
            "Invoices are stored in our secure database. \
             You can retrieve them using the invoice ID provided after generation.",
            "storage",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retriever() -> FaqRetriever {
        FaqRetriever::new(RagSettings::default())
    }

    #[test]
    fn test_default_corpus_loaded() {
        let retriever = retriever();
        assert_eq!(retriever.len(), 12);
    }

    #[test]
    fn test_exact_question_matches() {
        let retriever = retriever();
        let matched = retriever.answer("How do I create an invoice?").unwrap();
        assert!(matched.answer.contains("2x T-shirts"));
        assert!(matched.score > 0.3);
    }

    #[test]
    fn test_paraphrase_matches() {
        let retriever = retriever();
        let matched = retriever.answer("how to add items to an invoice").unwrap();
        assert_eq!(matched.category, "billing");
    }

    #[test]
    fn test_unrelated_query_misses() {
        let retriever = retriever();
        assert!(retriever.answer("weather forecast for tomorrow").is_none());
        assert!(retriever.answer("").is_none());
    }

    #[test]
    fn test_add_faq_rebuilds_index() {
        let retriever = retriever();
        retriever.add_faq(
            "Do you support multi-currency invoices?",
            "Yes, set the currency field when creating the invoice.",
            "billing",
        );
        assert_eq!(retriever.len(), 13);

        let matched = retriever
            .answer("Do you support multi-currency invoices?")
            .unwrap();
        assert!(matched.answer.contains("currency field"));
    }

    #[test]
    fn test_categories() {
        let retriever = retriever();
        let categories = retriever.categories();
        assert_eq!(categories, vec!["billing", "pdf", "tax", "payment", "storage"]);
        assert_eq!(retriever.faqs_by_category("pdf").len(), 2);
    }

    #[tokio::test]
    async fn test_contextual_answer_without_orchestrator() {
        let retriever = retriever();
        let answer = retriever
            .contextual_answer("How do I create an invoice?", "")
            .await
            .unwrap();
        assert!(answer.contains("2x T-shirts"));

        assert!(retriever
            .contextual_answer("weather forecast", "")
            .await
            .is_none());
    }
}
