use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::OrderLine;

/// Structured result of parsing a vendor offer document.
///
/// Every field except `order_lines` is nullable: an unreadable or empty
/// document still yields a well-formed, all-null result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferExtractionResult {
    pub requestor_name: Option<String>,
    pub vendor_name: Option<String>,
    pub vendor_vat_id: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub order_lines: Vec<OrderLine>,
    pub total_cost: Option<BigDecimal>,
    pub commodity_group_suggestion: Option<String>,
}
