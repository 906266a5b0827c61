//! Intent classification
//!
//! An ordered keyword cascade over the lower-cased question. The first
//! matching category wins, then the first matching entity within that
//! category. All keyword tables are data, ordered slices checked in
//! declaration order.

use serde::{Deserialize, Serialize};

/// Question category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Pricing,
    Contact,
    Location,
    Facility,
    General,
}

impl IntentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentCategory::Pricing => "pricing",
            IntentCategory::Contact => "contact",
            IntentCategory::Location => "location",
            IntentCategory::Facility => "facility",
            IntentCategory::General => "general",
        }
    }
}

/// Billing timeframe extracted from pricing questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Monthly,
    Daily,
    Hourly,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Monthly => "monthly",
            Timeframe::Daily => "daily",
            Timeframe::Hourly => "hourly",
        }
    }
}

/// Parsed user intent, immutable per question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub category: IntentCategory,
    /// Whether an entity was recognised
    pub is_specific: bool,
    /// Resolved entity key, e.g. "whitefield", "co-working", "parking"
    pub entity: Option<String>,
    /// Pricing timeframe, when the question implies one
    pub timeframe: Option<Timeframe>,
}

impl Intent {
    fn general() -> Self {
        Self {
            category: IntentCategory::General,
            is_specific: false,
            entity: None,
            timeframe: None,
        }
    }
}

const PRICING_KEYWORDS: &[&str] = &["price", "cost", "how much", "rate", "fee"];
const CONTACT_KEYWORDS: &[&str] = &["contact", "call", "email", "phone", "number", "visit", "tour"];
const LOCATION_KEYWORDS: &[&str] = &["where", "location", "address", "center", "branch"];
const FACILITY_KEYWORDS: &[&str] = &[
    "facility", "amenity", "service", "wifi", "internet", "parking", "meeting",
];

type EntityTable = &'static [(&'static str, &'static [&'static str])];

const PRICING_ENTITIES: EntityTable = &[
    (
        "co-working",
        &["coworking", "shared desk", "hot desk", "shared space", "per seat", "seat cost"],
    ),
    (
        "private_office",
        &["private office", "private cabin", "dedicated office", "team room"],
    ),
    ("day_pass", &["day pass", "daily pass", "trial", "visit day"]),
    (
        "virtual_office",
        &["virtual office", "business address", "mail service"],
    ),
    (
        "meeting_room",
        &["meeting room", "conference room", "board room"],
    ),
    ("parking", &["parking", "car parking", "vehicle parking"]),
];

const CONTACT_ENTITIES: EntityTable = &[
    ("sales", &["sales", "visit", "tour", "demo", "book"]),
    ("support", &["support", "help", "issue", "problem", "complaint"]),
    ("corporate", &["corporate", "business", "enterprise", "company"]),
    ("general", &["contact", "phone", "email", "number", "reach"]),
];

const LOCATION_ENTITIES: EntityTable = &[
    ("koramangala", &["koramangala", "koramangla"]),
    ("whitefield", &["whitefield", "itpl"]),
    ("electronic_city", &["electronic city", "ecity"]),
    ("indiranagar", &["indiranagar", "indira nagar"]),
    ("mg_road", &["mg road", "brigade road"]),
];

const FACILITY_ENTITIES: EntityTable = &[
    ("parking", &["parking"]),
    ("internet", &["wifi", "internet"]),
    ("meeting_room", &["meeting"]),
    ("access_hours", &["24/7", "24 hour"]),
];

/// Parses user questions into structured intents
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentParser;

impl IntentParser {
    pub fn new() -> Self {
        Self
    }

    /// Classify a question. Pure and infallible.
    pub fn parse(&self, question: &str) -> Intent {
        let question = question.to_lowercase();

        if matches_any(&question, PRICING_KEYWORDS) {
            self.parse_pricing(&question)
        } else if matches_any(&question, CONTACT_KEYWORDS) {
            self.entity_intent(&question, IntentCategory::Contact, CONTACT_ENTITIES)
        } else if matches_any(&question, LOCATION_KEYWORDS) {
            self.entity_intent(&question, IntentCategory::Location, LOCATION_ENTITIES)
        } else if matches_any(&question, FACILITY_KEYWORDS) {
            self.entity_intent(&question, IntentCategory::Facility, FACILITY_ENTITIES)
        } else {
            Intent::general()
        }
    }

    fn parse_pricing(&self, question: &str) -> Intent {
        let entity = resolve_entity(question, PRICING_ENTITIES);

        let timeframe = if question.contains("month") {
            Some(Timeframe::Monthly)
        } else if question.contains("day") || question.contains("daily") {
            Some(Timeframe::Daily)
        } else if question.contains("hour") {
            Some(Timeframe::Hourly)
        } else {
            None
        };

        Intent {
            category: IntentCategory::Pricing,
            is_specific: entity.is_some(),
            entity,
            timeframe,
        }
    }

    fn entity_intent(
        &self,
        question: &str,
        category: IntentCategory,
        table: EntityTable,
    ) -> Intent {
        let entity = resolve_entity(question, table);

        Intent {
            category,
            is_specific: entity.is_some(),
            entity,
            timeframe: None,
        }
    }
}

fn matches_any(question: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| question.contains(kw))
}

fn resolve_entity(question: &str, table: EntityTable) -> Option<String> {
    table
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| question.contains(p)))
        .map(|(entity, _)| (*entity).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(q: &str) -> Intent {
        IntentParser::new().parse(q)
    }

    #[test]
    fn test_pricing_with_entity() {
        let intent = parse("What's the per seat cost?");
        assert_eq!(intent.category, IntentCategory::Pricing);
        assert!(intent.is_specific);
        assert_eq!(intent.entity.as_deref(), Some("co-working"));
    }

    #[test]
    fn test_pricing_timeframe() {
        let intent = parse("What is the monthly rate for a hot desk?");
        assert_eq!(intent.timeframe, Some(Timeframe::Monthly));

        let intent = parse("How much is a day pass?");
        assert_eq!(intent.entity.as_deref(), Some("day_pass"));
        assert_eq!(intent.timeframe, Some(Timeframe::Daily));

        let intent = parse("Meeting room cost per hour?");
        assert_eq!(intent.timeframe, Some(Timeframe::Hourly));
    }

    #[test]
    fn test_pricing_without_entity() {
        let intent = parse("How much does it cost?");
        assert_eq!(intent.category, IntentCategory::Pricing);
        assert!(!intent.is_specific);
        assert_eq!(intent.entity, None);
    }

    #[test]
    fn test_contact_site_visit() {
        let intent = parse("Whom can I contact for a site visit?");
        assert_eq!(intent.category, IntentCategory::Contact);
        assert_eq!(intent.entity.as_deref(), Some("sales"));
    }

    #[test]
    fn test_location_with_alias() {
        let intent = parse("Where is your Electronic City center?");
        assert_eq!(intent.category, IntentCategory::Location);
        assert_eq!(intent.entity.as_deref(), Some("electronic_city"));

        let intent = parse("Where is the ITPL branch?");
        assert_eq!(intent.entity.as_deref(), Some("whitefield"));
    }

    #[test]
    fn test_facility() {
        let intent = parse("Do you have parking at Whitefield?");
        assert_eq!(intent.category, IntentCategory::Facility);
        assert_eq!(intent.entity.as_deref(), Some("parking"));

        let intent = parse("Is the wifi any good?");
        assert_eq!(intent.entity.as_deref(), Some("internet"));
    }

    #[test]
    fn test_category_order_pricing_wins() {
        // "cost" hits pricing before "parking" can hit facility
        let intent = parse("What does parking cost?");
        assert_eq!(intent.category, IntentCategory::Pricing);
        assert_eq!(intent.entity.as_deref(), Some("parking"));
    }

    #[test]
    fn test_entity_tie_break_is_table_order() {
        // Both "private office" and "parking" match pricing entities;
        // the earlier table entry wins
        let intent = parse("How much is a private office with parking?");
        assert_eq!(intent.category, IntentCategory::Pricing);
        assert_eq!(intent.entity.as_deref(), Some("private_office"));
    }

    #[test]
    fn test_general_fallback() {
        let intent = parse("Hello there");
        assert_eq!(intent.category, IntentCategory::General);
        assert!(!intent.is_specific);
    }
}
