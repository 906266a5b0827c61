//! Deterministic query pipeline for BizzHub Workspaces
//!
//! Intent classification, structured knowledge lookup, and templated
//! response synthesis. Everything here is pure and infallible: a
//! classification miss or a lookup miss is a valid outcome, never an
//! error.

pub mod base;
pub mod intent;
pub mod response;

pub use base::{CenterContact, ContactInfo, Facility, KnowledgeBase, PricingInfo};
pub use intent::{Intent, IntentCategory, IntentParser, Timeframe};
pub use response::{ChatResponse, ResponseGenerator};
