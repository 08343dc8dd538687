use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderLine, RequestStatus};

/// A stored procurement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementRequest {
    pub id: Uuid,
    pub requestor_name: String,
    pub title: String,
    pub vendor_name: String,
    pub vendor_vat_id: String,
    pub department: String,
    pub commodity_group: Option<String>,
    pub order_lines: Vec<OrderLine>,
    pub total_cost: BigDecimal,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProcurementRequest {
    /// Materialize a stored record from a creation payload.
    ///
    /// Assigns a fresh id, sets the status to `Open` and stamps both
    /// timestamps with the same instant.
    pub fn from_payload(payload: ProcurementRequestCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            requestor_name: payload.requestor_name,
            title: payload.title,
            vendor_name: payload.vendor_name,
            vendor_vat_id: payload.vendor_vat_id,
            department: payload.department,
            commodity_group: payload.commodity_group,
            order_lines: payload.order_lines,
            total_cost: payload.total_cost,
            status: RequestStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Incoming payload for creating a procurement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementRequestCreate {
    pub requestor_name: String,
    pub title: String,
    pub vendor_name: String,
    pub vendor_vat_id: String,
    pub department: String,
    #[serde(default)]
    pub commodity_group: Option<String>,
    pub order_lines: Vec<OrderLine>,
    pub total_cost: BigDecimal,
}

/// Body of `PATCH /requests/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}
