use crate::models::ProcurementRequestCreate;

/// Closed list of commodity group labels. Offered to the model as the
/// allowed values for its category suggestion and used by the classifier.
pub const COMMODITY_GROUPS: &[&str] = &[
    "General Services - Accommodation Rentals",
    "General Services - Membership Fees",
    "General Services - Workplace Safety",
    "General Services - Consulting",
    "General Services - Financial Services",
    "General Services - Fleet Management",
    "General Services - Recruitment Services",
    "General Services - Professional Development",
    "General Services - Miscellaneous Services",
    "General Services - Insurance",
    "Facility Management - Electrical Engineering",
    "Facility Management - Facility Management Services",
    "Facility Management - Security",
    "Facility Management - Renovations",
    "Facility Management - Office Equipment",
    "Facility Management - Energy Management",
    "Facility Management - Maintenance",
    "Facility Management - Cafeteria and Kitchenettes",
    "Facility Management - Cleaning",
    "Publishing Production - Audio and Visual Production",
    "Publishing Production - Books/Videos/CDs",
    "Publishing Production - Printing Costs",
    "Publishing Production - Software Development for Publishing",
    "Publishing Production - Material Costs",
    "Publishing Production - Shipping for Production",
    "Publishing Production - Digital Product Development",
    "Publishing Production - Pre-production",
    "Publishing Production - Post-production Costs",
    "Information Technology - Hardware",
    "Information Technology - IT Services",
    "Information Technology - Software",
    "Logistics - Courier, Express, and Postal Services",
    "Logistics - Warehousing and Material Handling",
    "Logistics - Transportation Logistics",
    "Logistics - Delivery Services",
    "Marketing & Advertising - Advertising",
    "Marketing & Advertising - Outdoor Advertising",
    "Marketing & Advertising - Marketing Agencies",
    "Marketing & Advertising - Direct Mail",
    "Marketing & Advertising - Customer Communication",
    "Marketing & Advertising - Online Marketing",
    "Marketing & Advertising - Events",
    "Marketing & Advertising - Promotional Materials",
    "Production - Warehouse and Operational Equipment",
    "Production - Production Machinery",
    "Production - Spare Parts",
    "Production - Internal Transportation",
    "Production - Production Materials",
    "Production - Consumables",
    "Production - Maintenance and Repairs",
    "Other",
];

/// Label returned when no keyword group matches.
pub const FALLBACK_GROUP: &str = "Other";

/// Ordered keyword groups; the first group with any substring match wins,
/// so earlier groups take precedence when several would match.
const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (
        &["adobe", "license", "software", "saas"],
        "Information Technology - Software",
    ),
    (
        &["macbook", "laptop", "notebook", "hardware"],
        "Information Technology - Hardware",
    ),
    (
        &["campaign", "ads", "facebook", "instagram", "marketing"],
        "Marketing & Advertising - Online Marketing",
    ),
];

/// Suggests commodity groups from free request text.
///
/// A deterministic keyword heuristic, not a trained classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommodityService;

impl CommodityService {
    pub fn new() -> Self {
        Self
    }

    /// Suggest a commodity group for a creation payload.
    pub fn suggest_for_request(&self, payload: &ProcurementRequestCreate) -> String {
        self.suggest(
            &payload.title,
            &payload.vendor_name,
            payload
                .order_lines
                .iter()
                .map(|line| line.position_description.as_str()),
        )
    }

    /// Classify the concatenation of title, vendor name and line
    /// descriptions, case-folded.
    pub fn suggest<'a>(
        &self,
        title: &str,
        vendor_name: &str,
        descriptions: impl Iterator<Item = &'a str>,
    ) -> String {
        let mut text = format!("{} {}", title, vendor_name);
        for description in descriptions {
            text.push(' ');
            text.push_str(description);
        }
        let text = text.to_lowercase();

        for (keywords, group) in KEYWORD_RULES {
            if keywords.iter().any(|keyword| text.contains(keyword)) {
                return (*group).to_string();
            }
        }

        FALLBACK_GROUP.to_string()
    }
}
