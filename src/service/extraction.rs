use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::normalize;
use crate::clients::{OfferModelClient, OpenAiError};
use crate::models::OfferExtractionResult;

/// Turns an uploaded vendor offer into a structured extraction result.
pub struct OfferExtractionService {
    client: Arc<dyn OfferModelClient>,
}

impl OfferExtractionService {
    pub fn new(client: Arc<dyn OfferModelClient>) -> Self {
        Self { client }
    }

    /// Extract structured offer data from an uploaded PDF.
    ///
    /// An empty upload degrades to the all-null result. Upstream failures
    /// surface as an error for the handler to map; everything below that
    /// (missing fields, malformed lines) degrades silently.
    pub async fn extract(
        &self,
        filename: &str,
        document: &[u8],
    ) -> Result<OfferExtractionResult, OpenAiError> {
        if document.is_empty() {
            info!(filename, "Empty upload, returning empty extraction result");
            return Ok(OfferExtractionResult::default());
        }

        let raw = self.client.extract_offer(filename, document).await?;
        Ok(map_raw_result(&raw))
    }
}

/// Map the model's loosely-typed JSON reply into the extraction result.
///
/// Missing keys become `None`, a missing or non-array `order_lines` becomes
/// an empty list, and malformed lines are dropped while the rest are kept.
pub fn map_raw_result(raw: &Value) -> OfferExtractionResult {
    let raw_lines: &[Value] = raw
        .get("order_lines")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut order_lines = Vec::with_capacity(raw_lines.len());
    for (index, raw_line) in raw_lines.iter().enumerate() {
        match normalize::normalize_line(raw_line) {
            Ok(line) => order_lines.push(line),
            Err(reason) => warn!(index, %reason, "Dropping malformed order line"),
        }
    }

    OfferExtractionResult {
        requestor_name: normalize::coerce_string(raw.get("requestor_name")),
        vendor_name: normalize::coerce_string(raw.get("vendor_name")),
        vendor_vat_id: normalize::coerce_string(raw.get("vendor_vat_id")),
        department: normalize::coerce_string(raw.get("department")),
        title: normalize::coerce_string(raw.get("title")),
        order_lines,
        total_cost: normalize::coerce_decimal(raw.get("total_cost")),
        commodity_group_suggestion: normalize::coerce_string(raw.get("commodity_group_suggestion")),
    }
}
