pub mod memory;

pub use memory::InMemoryRequestStore;

use uuid::Uuid;

use crate::models::{ProcurementRequest, ProcurementRequestCreate, RequestStatus};

/// Keyed storage for procurement requests.
///
/// Services depend only on this four-operation contract, so the in-memory
/// map can be swapped for a durable store without touching them.
pub trait RequestStore: Send + Sync {
    /// List stored requests, optionally filtered.
    ///
    /// `status_filter` is an exact match, `department` a case-insensitive
    /// exact match, `search` a case-insensitive substring match against
    /// title or vendor name.
    fn list(
        &self,
        status_filter: Option<RequestStatus>,
        department: Option<&str>,
        search: Option<&str>,
    ) -> Vec<ProcurementRequest>;

    fn get(&self, id: Uuid) -> Option<ProcurementRequest>;

    /// Persist a new request built from `payload`, assigning id, status
    /// and timestamps.
    fn create(&self, payload: ProcurementRequestCreate) -> ProcurementRequest;

    /// Replace a stored request, bumping `updated_at`.
    fn update(&self, request: ProcurementRequest) -> ProcurementRequest;
}
