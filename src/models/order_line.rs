use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// One priced item or service within an offer or request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default)]
    pub id: Option<i64>,
    pub position_description: String,
    pub unit_price: BigDecimal,
    pub amount: BigDecimal, // quantity, fractional values allowed
    pub unit: String,       // unit label, e.g. "Stk", "licenses"
    pub total_price: BigDecimal,
}
