use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use tracing::info;
use uuid::Uuid;

use super::CommodityService;
use crate::models::{ProcurementRequest, ProcurementRequestCreate, RequestStatus};
use crate::store::RequestStore;

/// Business logic around procurement requests.
pub struct RequestService {
    store: Arc<dyn RequestStore>,
    commodity: CommodityService,
}

impl RequestService {
    pub fn new(store: Arc<dyn RequestStore>, commodity: CommodityService) -> Self {
        Self { store, commodity }
    }

    pub fn list(
        &self,
        status_filter: Option<RequestStatus>,
        department: Option<&str>,
        search: Option<&str>,
    ) -> Vec<ProcurementRequest> {
        self.store.list(status_filter, department, search)
    }

    pub fn get(&self, id: Uuid) -> Option<ProcurementRequest> {
        self.store.get(id)
    }

    /// Create a request.
    ///
    /// A missing commodity group is filled with the classifier's
    /// suggestion. The submitted total is advisory: the stored total is
    /// always the exact decimal sum of the line totals.
    pub fn create(&self, mut payload: ProcurementRequestCreate) -> ProcurementRequest {
        if payload
            .commodity_group
            .as_deref()
            .map_or(true, str::is_empty)
        {
            let suggested = self.commodity.suggest_for_request(&payload);
            info!(commodity_group = %suggested, "No commodity group supplied, using suggestion");
            payload.commodity_group = Some(suggested);
        }

        let calculated = payload
            .order_lines
            .iter()
            .fold(BigDecimal::zero(), |sum, line| sum + &line.total_price);
        if payload.total_cost != calculated {
            info!(
                submitted = %payload.total_cost,
                calculated = %calculated,
                "Submitted total disagrees with line totals, overriding"
            );
            payload.total_cost = calculated;
        }

        self.store.create(payload)
    }

    /// Apply a status transition.
    ///
    /// Updating to the current status returns the stored record unchanged:
    /// no timestamp bump, no store write. Returns `None` for an unknown id.
    pub fn update_status(&self, id: Uuid, status: RequestStatus) -> Option<ProcurementRequest> {
        let mut request = self.store.get(id)?;
        if request.status == status {
            return Some(request);
        }

        request.status = status;
        Some(self.store.update(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderLine;
    use crate::store::InMemoryRequestStore;

    fn decimal(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn service() -> RequestService {
        RequestService::new(Arc::new(InMemoryRequestStore::new()), CommodityService::new())
    }

    fn line(description: &str, unit_price: &str, amount: u32, total: &str) -> OrderLine {
        OrderLine {
            id: None,
            position_description: description.to_string(),
            unit_price: decimal(unit_price),
            amount: BigDecimal::from(amount),
            unit: "Stk".to_string(),
            total_price: decimal(total),
        }
    }

    fn payload(total_cost: &str) -> ProcurementRequestCreate {
        ProcurementRequestCreate {
            requestor_name: "John Doe".to_string(),
            title: "Adobe Creative Cloud Licenses".to_string(),
            vendor_name: "Adobe".to_string(),
            vendor_vat_id: "DE123456789".to_string(),
            department: "IT".to_string(),
            commodity_group: None,
            order_lines: vec![
                line("Adobe CC license", "50.00", 2, "100.00"),
                line("Onboarding", "25.50", 1, "25.50"),
            ],
            total_cost: decimal(total_cost),
        }
    }

    #[test]
    fn create_overrides_mismatched_total() {
        let created = service().create(payload("999.99"));
        assert_eq!(created.total_cost, decimal("125.50"));
    }

    #[test]
    fn create_keeps_matching_total() {
        let created = service().create(payload("125.50"));
        assert_eq!(created.total_cost, decimal("125.50"));
    }

    #[test]
    fn create_fills_missing_commodity_group() {
        let created = service().create(payload("125.50"));
        assert_eq!(
            created.commodity_group.as_deref(),
            Some("Information Technology - Software")
        );
    }

    #[test]
    fn create_keeps_explicit_commodity_group() {
        let mut explicit = payload("125.50");
        explicit.commodity_group = Some("Facility Management - Office Equipment".to_string());
        let created = service().create(explicit);
        assert_eq!(
            created.commodity_group.as_deref(),
            Some("Facility Management - Office Equipment")
        );
    }

    #[test]
    fn same_status_update_is_a_no_op() {
        let service = service();
        let created = service.create(payload("125.50"));

        let unchanged = service
            .update_status(created.id, RequestStatus::Open)
            .unwrap();

        assert_eq!(unchanged.status, RequestStatus::Open);
        assert_eq!(unchanged.updated_at, created.updated_at);
        assert_eq!(
            service.get(created.id).unwrap().updated_at,
            created.updated_at
        );
    }

    #[test]
    fn status_change_bumps_updated_at() {
        let service = service();
        let created = service.create(payload("125.50"));

        std::thread::sleep(std::time::Duration::from_millis(2));
        let updated = service
            .update_status(created.id, RequestStatus::InProgress)
            .unwrap();

        assert_eq!(updated.status, RequestStatus::InProgress);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn status_update_for_unknown_id_is_none() {
        assert!(service()
            .update_status(Uuid::new_v4(), RequestStatus::Closed)
            .is_none());
    }
}
