//! FAQ retrieval for the BizzHub agent
//!
//! A TF-IDF index over FAQ questions with cosine-similarity lookup,
//! plus an optional LLM rephrasing step for matched answers. Retrieval
//! misses are valid outcomes, not errors; nothing in this crate fails.

pub mod retriever;
pub mod tfidf;

pub use retriever::{FaqEntry, FaqMatch, FaqRetriever};
pub use tfidf::TfIdfIndex;
