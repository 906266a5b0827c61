//! Structured knowledge base for BizzHub Workspaces
//!
//! Static fact tables built once and never mutated. Accessors return
//! `Option`/defaults on unknown keys, never errors.

use serde::Serialize;

use crate::intent::Timeframe;

/// A pricing plan as stored in the fact tables
#[derive(Debug, Clone, Copy)]
struct PricingPlan {
    key: &'static str,
    description: &'static str,
    monthly: Option<&'static str>,
    daily: Option<&'static str>,
    hourly: Option<&'static str>,
    includes: &'static [&'static str],
    variations: &'static [(&'static str, &'static str)],
}

/// Pricing lookup result, optionally filtered to one timeframe
#[derive(Debug, Clone, Serialize)]
pub struct PricingInfo {
    pub description: &'static str,
    pub monthly: Option<&'static str>,
    pub daily: Option<&'static str>,
    pub hourly: Option<&'static str>,
    pub includes: &'static [&'static str],
    pub variations: &'static [(&'static str, &'static str)],
}

impl PricingInfo {
    /// Rate for a given timeframe, if the plan carries one
    pub fn rate(&self, timeframe: Timeframe) -> Option<&'static str> {
        match timeframe {
            Timeframe::Monthly => self.monthly,
            Timeframe::Daily => self.daily,
            Timeframe::Hourly => self.hourly,
        }
    }
}

/// Contact channel details
#[derive(Debug, Clone, Serialize)]
pub struct ContactInfo {
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: &'static str,
    pub person: Option<&'static str>,
    pub whatsapp: Option<&'static str>,
    pub emergency: Option<&'static str>,
    pub website: Option<&'static str>,
}

/// Per-center contact details
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CenterContact {
    pub phone: &'static str,
    pub manager: &'static str,
}

/// A BizzHub center
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Center {
    pub key: &'static str,
    pub address: &'static str,
    pub contact: CenterContact,
}

/// A facility with its attribute table
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Facility {
    pub key: &'static str,
    pub description: &'static str,
    pub details: &'static [(&'static str, &'static str)],
}

impl Facility {
    pub fn detail(&self, key: &str) -> Option<&'static str> {
        self.details
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

const PRICING: &[PricingPlan] = &[
    PricingPlan {
        key: "co-working",
        description: "Hot desk in shared workspace",
        monthly: Some("₹8,000 - ₹12,000"),
        daily: Some("₹800 - ₹1,200"),
        hourly: None,
        includes: &[
            "Workspace access",
            "High-speed WiFi",
            "Tea/Coffee",
            "Community events",
            "Basic printing",
        ],
        variations: &[],
    },
    PricingPlan {
        key: "dedicated_desk",
        description: "Personal dedicated desk",
        monthly: Some("₹10,000 - ₹15,000"),
        daily: None,
        hourly: None,
        includes: &[
            "Personal desk",
            "24/7 access",
            "Lockable storage",
            "Meeting room credits",
            "Priority support",
        ],
        variations: &[],
    },
    PricingPlan {
        key: "private_office",
        description: "Private office for teams",
        monthly: Some("₹25,000 - ₹40,000"),
        daily: None,
        hourly: None,
        includes: &["Private locked room", "Ergonomic chairs", "Custom layout"],
        variations: &[],
    },
    PricingPlan {
        key: "private_cabin_2p",
        description: "Private office for 2 people",
        monthly: Some("₹25,000 - ₹30,000"),
        daily: None,
        hourly: None,
        includes: &[
            "Private locked room",
            "2 ergonomic chairs",
            "Custom branding",
            "2 meeting room hours/day",
        ],
        variations: &[],
    },
    PricingPlan {
        key: "private_cabin_4p",
        description: "Private office for 4 people",
        monthly: Some("₹35,000 - ₹40,000"),
        daily: None,
        hourly: None,
        includes: &[
            "Private locked room",
            "4 ergonomic chairs",
            "Custom layout",
            "4 meeting room hours/day",
        ],
        variations: &[],
    },
    PricingPlan {
        key: "day_pass",
        description: "Daily workspace access",
        monthly: None,
        daily: Some("₹800 - ₹1,200"),
        hourly: None,
        includes: &["Basic workspace", "WiFi", "Tea/Coffee", "Common areas"],
        variations: &[],
    },
    PricingPlan {
        key: "virtual_office",
        description: "Business address & mail services",
        monthly: Some("₹2,000 - ₹5,000"),
        daily: None,
        hourly: None,
        includes: &[
            "Business address",
            "Mail handling",
            "Meeting room discount",
            "Call answering",
        ],
        variations: &[],
    },
    PricingPlan {
        key: "parking",
        description: "Dedicated parking spot",
        monthly: Some("₹800 - ₹2,000"),
        daily: None,
        hourly: None,
        includes: &[],
        variations: &[
            ("koramangala", "₹1,000/month"),
            ("whitefield", "₹1,500/month"),
            ("electronic_city", "₹800/month"),
            ("indiranagar", "₹1,200/month"),
            ("mg_road", "₹2,000/month"),
        ],
    },
    PricingPlan {
        key: "meeting_room",
        description: "Meeting/conference room",
        monthly: None,
        daily: None,
        hourly: Some("₹500 - ₹1,500"),
        includes: &[],
        variations: &[
            ("4_seats", "₹500/hour"),
            ("8_seats", "₹800/hour"),
            ("12_seats", "₹1,200/hour"),
            ("board_room", "₹1,500/hour"),
        ],
    },
];

const CONTACT_GENERAL: ContactInfo = ContactInfo {
    phone: "080-4111-1000",
    email: "info@bizzhub.com",
    hours: "9 AM - 7 PM",
    person: None,
    whatsapp: None,
    emergency: None,
    website: Some("https://www.bizzhubworkspaces.com"),
};

const CONTACT_SALES: ContactInfo = ContactInfo {
    phone: "080-4111-2000",
    email: "sales@bizzhub.com",
    hours: "9 AM - 8 PM",
    person: Some("Priya Patel"),
    whatsapp: Some("+91-9876543210"),
    emergency: None,
    website: None,
};

const CONTACT_SUPPORT: ContactInfo = ContactInfo {
    phone: "080-4111-3000",
    email: "support@bizzhub.com",
    hours: "24/7",
    person: None,
    whatsapp: None,
    emergency: Some("+91-9000000000"),
    website: None,
};

const CENTERS: &[Center] = &[
    Center {
        key: "koramangala",
        address: "3rd Block, 80ft Road, Koramangala",
        contact: CenterContact {
            phone: "080-4111-2222",
            manager: "Rajesh",
        },
    },
    Center {
        key: "whitefield",
        address: "ITPL Main Road, Whitefield",
        contact: CenterContact {
            phone: "080-4111-3333",
            manager: "Meera",
        },
    },
    Center {
        key: "electronic_city",
        address: "Phase 1, Near Infosys, Electronic City",
        contact: CenterContact {
            phone: "080-4111-4444",
            manager: "Arjun",
        },
    },
    Center {
        key: "indiranagar",
        address: "100ft Road, Indiranagar",
        contact: CenterContact {
            phone: "080-4111-5555",
            manager: "Sanjay",
        },
    },
    Center {
        key: "mg_road",
        address: "Brigade Road Cross, MG Road",
        contact: CenterContact {
            phone: "080-4111-6666",
            manager: "Priya",
        },
    },
];

const FACILITIES: &[Facility] = &[
    Facility {
        key: "internet",
        description: "High-speed dedicated fiber",
        details: &[("speed", "100 Mbps"), ("included", "yes")],
    },
    Facility {
        key: "parking",
        description: "Secure parking facilities",
        details: &[("availability", "All centers"), ("cost", "₹800 - ₹2,000/month")],
    },
    Facility {
        key: "meeting_rooms",
        description: "Fully equipped meeting spaces",
        details: &[
            ("sizes", "4-seater, 8-seater, 12-seater, Board room"),
            ("cost", "₹500 - ₹1,500/hour"),
        ],
    },
    Facility {
        key: "access_hours",
        description: "Center access hours",
        details: &[
            ("co_working", "8 AM - 10 PM"),
            ("dedicated_desk", "24/7"),
            ("private_office", "24/7"),
        ],
    },
];

const ADDITIONAL_AMENITIES: &[&str] = &[
    "Pantry with tea/coffee",
    "Printing & scanning (100 pages free)",
    "Mail handling services",
    "Reception support",
    "Community events",
    "IT support (basic included)",
];

/// Human-readable form of a snake_case fact key
pub fn display_name(key: &str) -> String {
    key.split(['_', '-'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Structured knowledge about BizzHub Workspaces
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeBase;

impl KnowledgeBase {
    pub fn new() -> Self {
        Self
    }

    /// Pricing lookup. With a timeframe the plan carries, the result is
    /// filtered to that timeframe's rate; otherwise the full plan is
    /// returned. Unknown entities yield `None`.
    pub fn pricing(&self, entity: &str, timeframe: Option<Timeframe>) -> Option<PricingInfo> {
        let plan = PRICING.iter().find(|p| p.key == entity)?;

        let full = PricingInfo {
            description: plan.description,
            monthly: plan.monthly,
            daily: plan.daily,
            hourly: plan.hourly,
            includes: plan.includes,
            variations: plan.variations,
        };

        match timeframe {
            Some(tf) if full.rate(tf).is_some() => Some(PricingInfo {
                monthly: full.monthly.filter(|_| tf == Timeframe::Monthly),
                daily: full.daily.filter(|_| tf == Timeframe::Daily),
                hourly: full.hourly.filter(|_| tf == Timeframe::Hourly),
                ..full
            }),
            _ => Some(full),
        }
    }

    /// Contact lookup. Unknown or missing entities fall back to general.
    pub fn contact(&self, entity: Option<&str>) -> &'static ContactInfo {
        match entity {
            Some("sales") => &CONTACT_SALES,
            Some("support") => &CONTACT_SUPPORT,
            _ => &CONTACT_GENERAL,
        }
    }

    /// A single center by key
    pub fn location(&self, center: &str) -> Option<&'static Center> {
        CENTERS.iter().find(|c| c.key == center)
    }

    /// All centers, in listing order
    pub fn centers(&self) -> &'static [Center] {
        CENTERS
    }

    /// A single facility by key
    pub fn facility(&self, name: &str) -> Option<&'static Facility> {
        FACILITIES.iter().find(|f| f.key == name)
    }

    /// All facilities
    pub fn facilities(&self) -> &'static [Facility] {
        FACILITIES
    }

    /// Amenities beyond the core facility list
    pub fn additional_amenities(&self) -> &'static [&'static str] {
        ADDITIONAL_AMENITIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_full_plan() {
        let kb = KnowledgeBase::new();
        let info = kb.pricing("co-working", None).unwrap();
        assert_eq!(info.monthly, Some("₹8,000 - ₹12,000"));
        assert_eq!(info.daily, Some("₹800 - ₹1,200"));
        assert_eq!(info.includes.len(), 5);
    }

    #[test]
    fn test_pricing_timeframe_filter() {
        let kb = KnowledgeBase::new();
        let info = kb.pricing("co-working", Some(Timeframe::Daily)).unwrap();
        assert_eq!(info.daily, Some("₹800 - ₹1,200"));
        assert_eq!(info.monthly, None);
    }

    #[test]
    fn test_pricing_timeframe_not_carried() {
        // Day pass has no monthly rate, so the full plan comes back
        let kb = KnowledgeBase::new();
        let info = kb.pricing("day_pass", Some(Timeframe::Monthly)).unwrap();
        assert_eq!(info.daily, Some("₹800 - ₹1,200"));
        assert_eq!(info.monthly, None);
        assert_eq!(info.rate(Timeframe::Monthly), None);
    }

    #[test]
    fn test_pricing_unknown_entity() {
        let kb = KnowledgeBase::new();
        assert!(kb.pricing("helipad", None).is_none());
    }

    #[test]
    fn test_parking_variations() {
        let kb = KnowledgeBase::new();
        let info = kb.pricing("parking", Some(Timeframe::Monthly)).unwrap();
        assert_eq!(info.monthly, Some("₹800 - ₹2,000"));
        assert_eq!(info.variations.len(), 5);
        assert_eq!(info.variations[0], ("koramangala", "₹1,000/month"));
    }

    #[test]
    fn test_contact_fallback() {
        let kb = KnowledgeBase::new();
        assert_eq!(kb.contact(Some("sales")).person, Some("Priya Patel"));
        // Unknown entities fall back to general
        assert_eq!(kb.contact(Some("corporate")).phone, "080-4111-1000");
        assert_eq!(kb.contact(None).email, "info@bizzhub.com");
    }

    #[test]
    fn test_locations() {
        let kb = KnowledgeBase::new();
        assert_eq!(kb.centers().len(), 5);

        let center = kb.location("electronic_city").unwrap();
        assert_eq!(center.address, "Phase 1, Near Infosys, Electronic City");
        assert_eq!(center.contact.phone, "080-4111-4444");
        assert_eq!(center.contact.manager, "Arjun");

        assert!(kb.location("mysore").is_none());
    }

    #[test]
    fn test_facilities() {
        let kb = KnowledgeBase::new();
        let internet = kb.facility("internet").unwrap();
        assert_eq!(internet.detail("speed"), Some("100 Mbps"));
        assert!(kb.facility("spa").is_none());
        assert_eq!(kb.facilities().len(), 4);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("electronic_city"), "Electronic City");
        assert_eq!(display_name("co-working"), "Co Working");
        assert_eq!(display_name("whitefield"), "Whitefield");
    }
}
