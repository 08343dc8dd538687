use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::RequestStore;
use crate::models::{ProcurementRequest, ProcurementRequestCreate, RequestStatus};

/// In-memory request store backed by a concurrent map.
///
/// DashMap's sharded locks make every single-record mutation atomic;
/// racing writers to the same id resolve last-writer-wins.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    requests: DashMap<Uuid, ProcurementRequest>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
        }
    }
}

impl RequestStore for InMemoryRequestStore {
    fn list(
        &self,
        status_filter: Option<RequestStatus>,
        department: Option<&str>,
        search: Option<&str>,
    ) -> Vec<ProcurementRequest> {
        let mut items: Vec<ProcurementRequest> = self
            .requests
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        if let Some(status) = status_filter {
            items.retain(|r| r.status == status);
        }

        if let Some(department) = department {
            let wanted = department.to_lowercase();
            items.retain(|r| r.department.to_lowercase() == wanted);
        }

        if let Some(search) = search {
            let needle = search.to_lowercase();
            items.retain(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.vendor_name.to_lowercase().contains(&needle)
            });
        }

        // Map iteration order is arbitrary; keep responses stable.
        items.sort_by_key(|r| r.created_at);
        items
    }

    fn get(&self, id: Uuid) -> Option<ProcurementRequest> {
        self.requests.get(&id).map(|entry| entry.value().clone())
    }

    fn create(&self, payload: ProcurementRequestCreate) -> ProcurementRequest {
        let request = ProcurementRequest::from_payload(payload);
        self.requests.insert(request.id, request.clone());
        request
    }

    fn update(&self, mut request: ProcurementRequest) -> ProcurementRequest {
        request.updated_at = Utc::now();
        self.requests.insert(request.id, request.clone());
        request
    }
}
