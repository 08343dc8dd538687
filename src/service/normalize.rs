use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;
use thiserror::Error;

use crate::models::OrderLine;

/// Unit label used when the document gave none.
pub const DEFAULT_UNIT: &str = "Stk";

/// Why a raw order line was dropped during extraction mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineRejection {
    #[error("line is not a JSON object")]
    NotAnObject,
    #[error("missing or invalid `{0}`")]
    Invalid(&'static str),
}

/// Coerce a raw JSON value into a decimal.
///
/// Accepts numbers and numeric strings; anything else, including an absent
/// or null value, yields `None` rather than an error.
pub fn coerce_decimal(value: Option<&Value>) -> Option<BigDecimal> {
    match value? {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce a raw JSON value into a non-empty, trimmed string.
pub fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// Normalize one raw order line from the model reply.
///
/// Per-field problems degrade to `None` and are repaired where possible
/// (recomputed total, defaulted unit); the line is rejected only when a
/// required field is still missing or invalid at construction time.
pub fn normalize_line(raw: &Value) -> Result<OrderLine, LineRejection> {
    let object = raw.as_object().ok_or(LineRejection::NotAnObject)?;

    let unit_price = coerce_decimal(object.get("unit_price"));
    let amount = coerce_decimal(object.get("amount"));
    let total_price = coerce_decimal(object.get("total_price"));
    let unit = coerce_string(object.get("unit")).unwrap_or_else(|| DEFAULT_UNIT.to_string());

    let position_description = coerce_string(object.get("position_description"))
        .ok_or(LineRejection::Invalid("position_description"))?;

    let unit_price = unit_price.ok_or(LineRejection::Invalid("unit_price"))?;
    if unit_price < BigDecimal::zero() {
        return Err(LineRejection::Invalid("unit_price"));
    }

    let amount = amount.ok_or(LineRejection::Invalid("amount"))?;
    if amount <= BigDecimal::zero() {
        return Err(LineRejection::Invalid("amount"));
    }

    // A missing or zero total is recomputed from unit price and quantity.
    // A present nonzero total is kept as-is, even when it disagrees with
    // unit_price * amount; mismatches are only corrected in aggregate.
    let total_price = match total_price {
        Some(total) if !total.is_zero() => total,
        _ => &unit_price * &amount,
    };

    Ok(OrderLine {
        id: object.get("id").and_then(Value::as_i64),
        position_description,
        unit_price,
        amount,
        unit,
        total_price,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn decimal(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn accepts_numeric_strings() {
        let line = normalize_line(&json!({
            "position_description": "Adobe Creative Cloud",
            "unit_price": "49.99",
            "amount": "2",
            "unit": "licenses",
            "total_price": "99.98",
        }))
        .unwrap();

        assert_eq!(line.unit_price, decimal("49.99"));
        assert_eq!(line.amount, decimal("2"));
        assert_eq!(line.total_price, decimal("99.98"));
    }

    #[test]
    fn missing_unit_defaults_to_stk() {
        let line = normalize_line(&json!({
            "position_description": "Shipping",
            "unit_price": 5.00,
            "amount": 1,
            "total_price": 5.00,
        }))
        .unwrap();

        assert_eq!(line.unit, "Stk");
    }

    #[test]
    fn empty_unit_defaults_to_stk() {
        let line = normalize_line(&json!({
            "position_description": "Shipping",
            "unit": "  ",
            "unit_price": 5.00,
            "amount": 1,
            "total_price": 5.00,
        }))
        .unwrap();

        assert_eq!(line.unit, "Stk");
    }

    #[test]
    fn missing_total_is_recomputed() {
        let line = normalize_line(&json!({
            "position_description": "Adobe Creative Cloud",
            "unit_price": 49.99,
            "amount": 2,
            "unit": "licenses",
        }))
        .unwrap();

        assert_eq!(line.total_price, decimal("99.98"));
    }

    #[test]
    fn zero_total_is_recomputed() {
        let line = normalize_line(&json!({
            "position_description": "Adobe Creative Cloud",
            "unit_price": 49.99,
            "amount": 2,
            "unit": "licenses",
            "total_price": 0,
        }))
        .unwrap();

        assert_eq!(line.total_price, decimal("99.98"));
    }

    #[test]
    fn mismatched_nonzero_total_is_kept() {
        let line = normalize_line(&json!({
            "position_description": "Adobe Creative Cloud",
            "unit_price": 49.99,
            "amount": 2,
            "unit": "licenses",
            "total_price": 101.00,
        }))
        .unwrap();

        assert_eq!(line.total_price, decimal("101.00"));
    }

    #[test]
    fn uncoercible_numeric_field_rejects_only_when_required() {
        // total_price is garbage but recomputable, so the line survives
        let line = normalize_line(&json!({
            "position_description": "Adobe Creative Cloud",
            "unit_price": 49.99,
            "amount": 2,
            "unit": "licenses",
            "total_price": "n/a",
        }))
        .unwrap();
        assert_eq!(line.total_price, decimal("99.98"));

        // unit_price is garbage and required
        let err = normalize_line(&json!({
            "position_description": "Adobe Creative Cloud",
            "unit_price": "n/a",
            "amount": 2,
        }))
        .unwrap_err();
        assert_eq!(err, LineRejection::Invalid("unit_price"));
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            normalize_line(&json!("just a string")).unwrap_err(),
            LineRejection::NotAnObject
        );
        assert_eq!(
            normalize_line(&json!([1, 2, 3])).unwrap_err(),
            LineRejection::NotAnObject
        );
    }

    #[test]
    fn rejects_missing_description() {
        let err = normalize_line(&json!({
            "unit_price": 10,
            "amount": 1,
        }))
        .unwrap_err();
        assert_eq!(err, LineRejection::Invalid("position_description"));
    }

    #[test]
    fn rejects_non_positive_amount() {
        let err = normalize_line(&json!({
            "position_description": "Discount",
            "unit_price": 10,
            "amount": 0,
        }))
        .unwrap_err();
        assert_eq!(err, LineRejection::Invalid("amount"));
    }

    #[test]
    fn rejects_negative_unit_price() {
        let err = normalize_line(&json!({
            "position_description": "Discount",
            "unit_price": -10,
            "amount": 1,
        }))
        .unwrap_err();
        assert_eq!(err, LineRejection::Invalid("unit_price"));
    }
}
