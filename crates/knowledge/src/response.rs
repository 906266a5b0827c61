//! Templated response synthesis
//!
//! Pure dispatch on the parsed intent category. Each branch carries a
//! fixed confidence and three follow-up suggestions.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::base::{display_name, KnowledgeBase, PricingInfo};
use crate::intent::{Intent, IntentCategory, Timeframe};

/// Answer source for deterministic branches
pub const SOURCE_KNOWLEDGE_BASE: &str = "knowledge_base";
/// Answer source for the welcome fallback
pub const SOURCE_GENERAL: &str = "general_knowledge";

/// Structured response returned by the deterministic pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub confidence: f64,
    pub follow_up_questions: Vec<String>,
    pub source: String,
}

impl ChatResponse {
    fn new(answer: String, confidence: f64, follow_ups: &[&str], source: &str) -> Self {
        Self {
            answer,
            confidence,
            follow_up_questions: follow_ups.iter().map(|s| s.to_string()).collect(),
            source: source.to_string(),
        }
    }
}

/// Generates professional, conversational responses from intents
#[derive(Debug, Clone, Copy)]
pub struct ResponseGenerator {
    kb: KnowledgeBase,
}

impl ResponseGenerator {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Generate a response for a parsed intent. Pure and infallible.
    pub fn generate(&self, intent: &Intent, question: &str) -> ChatResponse {
        match intent.category {
            IntentCategory::Pricing => self.pricing_response(intent),
            IntentCategory::Contact => self.contact_response(intent, question),
            IntentCategory::Location => self.location_response(intent),
            IntentCategory::Facility => self.facility_response(intent),
            IntentCategory::General => self.general_response(),
        }
    }

    fn pricing_response(&self, intent: &Intent) -> ChatResponse {
        let Some(entity) = intent.entity.as_deref() else {
            return ChatResponse::new(
                general_pricing_overview(),
                0.9,
                &[
                    "Are you looking for co-working or private office?",
                    "How many people are in your team?",
                    "Do you need daily or monthly plans?",
                ],
                SOURCE_KNOWLEDGE_BASE,
            );
        };

        let timeframe = intent.timeframe.unwrap_or(Timeframe::Monthly);

        let Some(info) = self.kb.pricing(entity, Some(timeframe)) else {
            return ChatResponse::new(
                "I understand you're asking about pricing. Could you specify if you're \
                 interested in co-working spaces, private offices, or other services?"
                    .to_string(),
                0.6,
                &pricing_follow_ups(None),
                SOURCE_KNOWLEDGE_BASE,
            );
        };

        ChatResponse::new(
            self.specific_pricing(entity, &info, timeframe),
            0.95,
            &pricing_follow_ups(Some(entity)),
            SOURCE_KNOWLEDGE_BASE,
        )
    }

    fn specific_pricing(&self, entity: &str, info: &PricingInfo, timeframe: Timeframe) -> String {
        match entity {
            "co-working" => {
                let price = info
                    .monthly
                    .or(info.daily)
                    .unwrap_or("₹8,000 - ₹12,000");
                let suffix = if timeframe == Timeframe::Monthly {
                    "/month"
                } else {
                    "/day"
                };
                let includes = if info.includes.is_empty() {
                    "Workspace access, WiFi, Basic amenities".to_string()
                } else {
                    info.includes.join(", ")
                };

                format!(
                    "💺 **Co-Working Space Pricing:**\n\n\
                     • **Price:** {price}{suffix}\n\
                     • **Includes:** {includes}\n\n\
                     💡 *Perfect for freelancers, remote workers, and small teams.*\n\
                     📞 **Get exact quote:** Call 080-4111-2000 or visit our website."
                )
            }
            "private_office" => {
                let price = info.monthly.unwrap_or("₹25,000 - ₹40,000");
                let includes = if info.includes.is_empty() {
                    "Private locked room, Ergonomic chairs, Custom layout".to_string()
                } else {
                    info.includes.join(", ")
                };

                format!(
                    "🚪 **Private Office Pricing:**\n\n\
                     • **Price:** {price}/month\n\
                     • **Includes:** {includes}\n\n\
                     💡 *Ideal for growing teams needing privacy and branding.*\n\
                     📞 **Schedule a tour:** Call 080-4111-2000"
                )
            }
            "parking" => {
                let price = info.monthly.unwrap_or("₹800 - ₹2,000");
                let mut rates = String::new();
                for (center, rate) in info.variations.iter().take(3) {
                    let _ = writeln!(rates, "- {}: {}", display_name(center), rate);
                }

                format!(
                    "🚗 **Parking Information:**\n\n\
                     • **Monthly parking:** {price}\n\
                     • **Availability:** All centers\n\
                     • **Security:** CCTV monitored, 24/7\n\n\
                     📍 **Center-specific rates:**\n{rates}\n\
                     📞 **Confirm availability:** Call your nearest center."
                )
            }
            _ => format!(
                "**{}:** {}",
                info.description,
                info.rate(timeframe).unwrap_or("Contact for pricing")
            ),
        }
    }

    fn contact_response(&self, intent: &Intent, question: &str) -> ChatResponse {
        let question = question.to_lowercase();
        let wants_visit = intent.entity.as_deref() == Some("sales")
            || question.contains("visit")
            || question.contains("tour");

        if wants_visit {
            let sales = self.kb.contact(Some("sales"));
            let website = self.kb.contact(None).website.unwrap_or_default();

            let answer = format!(
                "📅 **Schedule a Site Visit:**\n\n\
                 • **Contact:** {} (Sales Manager)\n\
                 • **Phone:** {}\n\
                 • **Email:** {}\n\
                 • **WhatsApp:** {}\n\
                 • **Hours:** {}\n\n\
                 📍 **Available at all centers:**\n\
                 - Koramangala: 080-4111-2222\n\
                 - Whitefield: 080-4111-3333\n\
                 - Electronic City: 080-4111-4444\n\n\
                 🌐 **Book online:** {}/book-tour",
                sales.person.unwrap_or("Sales Team"),
                sales.phone,
                sales.email,
                sales.whatsapp.unwrap_or("on request"),
                sales.hours,
                website,
            );

            return ChatResponse::new(
                answer,
                0.95,
                &[
                    "Which center would you like to visit?",
                    "What time works for you?",
                    "How many people in your team?",
                ],
                SOURCE_KNOWLEDGE_BASE,
            );
        }

        let contact = self.kb.contact(intent.entity.as_deref());
        let website = self.kb.contact(None).website.unwrap_or_default();

        let mut centers = String::new();
        for center in self.kb.centers() {
            let _ = writeln!(
                centers,
                "- {}: {}",
                display_name(center.key),
                center.contact.phone
            );
        }

        let answer = format!(
            "📞 **Contact BizzHub Workspaces:**\n\n\
             **General Enquiries:**\n\
             • Phone: {}\n\
             • Email: {}\n\
             • Hours: {}\n\n\
             **Website:** {}\n\n\
             **Center Contacts:**\n{}\n\
             **24/7 Support:** 080-4111-3000",
            contact.phone, contact.email, contact.hours, website, centers,
        );

        ChatResponse::new(
            answer,
            0.9,
            &[
                "Are you looking for sales, support, or general info?",
                "Which center are you interested in?",
                "Can I help with anything specific?",
            ],
            SOURCE_KNOWLEDGE_BASE,
        )
    }

    fn location_response(&self, intent: &Intent) -> ChatResponse {
        if let Some(center) = intent
            .entity
            .as_deref()
            .and_then(|key| self.kb.location(key))
        {
            let website = self.kb.contact(None).website.unwrap_or_default();

            let answer = format!(
                "📍 **BizzHub {} Center:**\n\n\
                 **Address:** {}\n\
                 **Contact:** {}\n\
                 **Manager:** {}\n\n\
                 **Features:**\n\
                 - High-speed WiFi\n\
                 - Meeting rooms\n\
                 - Parking available\n\
                 - 24/7 access (for members)\n\
                 - Pantry facilities\n\n\
                 🚗 **Get directions:** {}/locations/{}",
                display_name(center.key),
                center.address,
                center.contact.phone,
                center.contact.manager,
                website,
                center.key,
            );

            return ChatResponse::new(
                answer,
                0.95,
                &[
                    "Would you like to book a tour?",
                    "Do you need parking information?",
                    "What are your working hours?",
                ],
                SOURCE_KNOWLEDGE_BASE,
            );
        }

        let mut answer = String::from("📍 **Our Bangalore Centers:**\n\n");
        for center in self.kb.centers() {
            let _ = writeln!(
                answer,
                "• **{}:** {}\n   📞 {} (Manager: {})\n",
                display_name(center.key),
                center.address,
                center.contact.phone,
                center.contact.manager,
            );
        }
        let website = self.kb.contact(None).website.unwrap_or_default();
        let _ = write!(answer, "🌐 **View all centers:** {}/locations", website);

        ChatResponse::new(
            answer,
            0.9,
            &[
                "Which center are you closest to?",
                "Would you like directions to a specific center?",
                "Do you need center-specific pricing?",
            ],
            SOURCE_KNOWLEDGE_BASE,
        )
    }

    fn facility_response(&self, intent: &Intent) -> ChatResponse {
        match intent.entity.as_deref() {
            Some("parking") => {
                let cost = self
                    .kb
                    .pricing("parking", None)
                    .and_then(|p| p.monthly)
                    .unwrap_or("₹800 - ₹2,000");

                let mut rates = String::new();
                if let Some(info) = self.kb.pricing("parking", None) {
                    for (center, rate) in info.variations {
                        let _ = writeln!(rates, "- {}: {}", display_name(center), rate);
                    }
                }

                let answer = format!(
                    "🚗 **Parking Facilities:**\n\n\
                     **Availability:** All centers\n\
                     **Cost:** {cost}/month\n\n\
                     **Center-Specific Rates:**\n{rates}\n\
                     **Features:**\n\
                     • CCTV monitored 24/7\n\
                     • Dedicated slots for members\n\
                     • Visitor parking available\n\
                     • EV charging (Whitefield & Electronic City)\n\n\
                     📞 **Reserve parking:** Contact your nearest center"
                );

                ChatResponse::new(
                    answer,
                    0.95,
                    &[
                        "Which center are you at?",
                        "Do you need monthly or visitor parking?",
                        "Do you have an electric vehicle?",
                    ],
                    SOURCE_KNOWLEDGE_BASE,
                )
            }
            Some("internet") => {
                let speed = self
                    .kb
                    .facility("internet")
                    .and_then(|f| f.detail("speed"))
                    .unwrap_or("100 Mbps");

                let answer = format!(
                    "🌐 **Internet Services:**\n\n\
                     **Speed:** {speed} dedicated fiber\n\
                     **Availability:** Included in all plans\n\
                     **Reliability:** 99.9% uptime guarantee\n\n\
                     **Features:**\n\
                     • Enterprise-grade security\n\
                     • Separate guest network\n\
                     • IT support available\n\
                     • Backup connection\n\n\
                     💡 *Perfect for video calls, large uploads, and remote teams.*"
                );

                ChatResponse::new(
                    answer,
                    0.95,
                    &[
                        "Do you need dedicated bandwidth?",
                        "How many devices will connect?",
                        "Do you require VPN setup?",
                    ],
                    SOURCE_KNOWLEDGE_BASE,
                )
            }
            _ => {
                let answer = "🛠️ **Our Facilities & Amenities:**\n\n\
                     **Core Services:**\n\
                     • High-speed internet (100 Mbps, included)\n\
                     • Meeting rooms (book by hour/day)\n\
                     • 24/7 access for members\n\
                     • Secure parking (additional cost)\n\n\
                     **Additional Amenities:**\n\
                     • Pantry with tea/coffee\n\
                     • Printing & scanning\n\
                     • Mail handling\n\
                     • Reception support\n\
                     • Community events\n\
                     • Basic IT support\n\n\
                     **Premium Services:**\n\
                     • Dedicated internet lines\n\
                     • Premium IT support\n\
                     • Custom branding\n\
                     • Event space rental\n\n\
                     📞 **Learn more:** 080-4111-1000"
                    .to_string();

                ChatResponse::new(
                    answer,
                    0.9,
                    &[
                        "Which facility are you most interested in?",
                        "Do you need specific equipment?",
                        "What's your team size?",
                    ],
                    SOURCE_KNOWLEDGE_BASE,
                )
            }
        }
    }

    fn general_response(&self) -> ChatResponse {
        let answer = "🏢 **Welcome to BizzHub Workspaces!**\n\n\
             I can help you with:\n\
             • **Pricing & Plans** - Co-working, private offices, day passes\n\
             • **Locations** - Our 5 centers across Bangalore\n\
             • **Facilities** - Internet, parking, meeting rooms\n\
             • **Contact Information** - Phone, email, site visits\n\n\
             What would you like to know about?"
            .to_string();

        ChatResponse::new(
            answer,
            0.7,
            &[
                "What type of workspace do you need?",
                "How many people are in your team?",
                "Which area of Bangalore are you in?",
            ],
            SOURCE_GENERAL,
        )
    }
}

fn general_pricing_overview() -> String {
    "💼 **Pricing Overview:**\n\n\
     **Co-Working Spaces:**\n\
     • Hot Desk: ₹8,000 - ₹12,000/month\n\
     • Dedicated Desk: ₹10,000 - ₹15,000/month\n\
     • Day Pass: ₹800 - ₹1,200/day\n\n\
     **Private Offices:**\n\
     • 2-person cabin: ₹25,000 - ₹30,000/month\n\
     • 4-person cabin: ₹35,000 - ₹40,000/month\n\
     • Team suites (6-10p): ₹60,000 - ₹90,000/month\n\n\
     **Additional Services:**\n\
     • Parking: ₹800 - ₹2,000/month\n\
     • Meeting Rooms: ₹500 - ₹1,500/hour\n\
     • Virtual Office: ₹2,000 - ₹5,000/month\n\n\
     *Note: All prices exclude GST. Exact rates depend on location and contract terms.*\n\n\
     📞 For a personalized quote, contact our sales team at **080-4111-2000** \
     or email **sales@bizzhub.com**."
        .to_string()
}

fn pricing_follow_ups(entity: Option<&str>) -> [&'static str; 3] {
    match entity {
        Some("co-working") => [
            "Do you need 24/7 access?",
            "How many meeting room hours do you need?",
            "Would you like to see our available centers?",
        ],
        Some("private_office") => [
            "How many people in your team?",
            "Do you need custom branding?",
            "Would you like a virtual tour?",
        ],
        _ => [
            "What's your team size?",
            "Which location are you interested in?",
            "Do you need parking facilities?",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentParser;

    fn respond(question: &str) -> ChatResponse {
        let parser = IntentParser::new();
        let generator = ResponseGenerator::new(KnowledgeBase::new());
        generator.generate(&parser.parse(question), question)
    }

    #[test]
    fn test_specific_pricing_confidence() {
        let response = respond("What's the per seat cost?");
        assert_eq!(response.confidence, 0.95);
        assert_eq!(response.source, SOURCE_KNOWLEDGE_BASE);
        assert!(response.answer.contains("Co-Working Space Pricing"));
        assert!(response.answer.contains("₹8,000 - ₹12,000"));
    }

    #[test]
    fn test_pricing_overview() {
        let response = respond("How much does it cost?");
        assert_eq!(response.confidence, 0.9);
        assert!(response.answer.contains("Pricing Overview"));
        assert_eq!(response.follow_up_questions.len(), 3);
    }

    #[test]
    fn test_site_visit_response() {
        let response = respond("Whom can I contact for a site visit?");
        assert_eq!(response.confidence, 0.95);
        assert!(response.answer.contains("Priya Patel"));
        assert!(response.answer.contains("080-4111-2000"));
    }

    #[test]
    fn test_general_contact_response() {
        let response = respond("What's your phone number?");
        assert_eq!(response.confidence, 0.9);
        assert!(response.answer.contains("080-4111-1000"));
        assert!(response.answer.contains("Mg Road"));
    }

    #[test]
    fn test_location_detail() {
        let response = respond("Where is your Electronic City center?");
        assert_eq!(response.confidence, 0.95);
        assert!(response.answer.contains("Phase 1, Near Infosys, Electronic City"));
        assert!(response.answer.contains("080-4111-4444"));
        assert!(response.answer.contains("Arjun"));
    }

    #[test]
    fn test_location_listing() {
        let response = respond("Which locations do you have?");
        assert_eq!(response.confidence, 0.9);
        assert!(response.answer.contains("Koramangala"));
        assert!(response.answer.contains("Whitefield"));
        assert!(response.answer.contains("Indiranagar"));
    }

    #[test]
    fn test_facility_branches() {
        let response = respond("Do you have parking at Whitefield?");
        assert_eq!(response.confidence, 0.95);
        assert!(response.answer.contains("Parking Facilities"));
        assert!(response.answer.contains("Whitefield: ₹1,500/month"));

        let response = respond("Tell me about the wifi");
        assert_eq!(response.confidence, 0.95);
        assert!(response.answer.contains("100 Mbps"));

        let response = respond("What services are included?");
        assert_eq!(response.confidence, 0.9);
        assert!(response.answer.contains("Facilities & Amenities"));
    }

    #[test]
    fn test_general_welcome() {
        let response = respond("Hello!");
        assert_eq!(response.confidence, 0.7);
        assert_eq!(response.source, SOURCE_GENERAL);
        assert!(response.answer.contains("Welcome to BizzHub"));
    }

    #[test]
    fn test_private_office_pricing() {
        let response = respond("How much for a private cabin?");
        assert_eq!(response.confidence, 0.95);
        assert!(response.answer.contains("Private Office Pricing"));
        assert!(response.answer.contains("₹25,000 - ₹40,000"));
    }
}
