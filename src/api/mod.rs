pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::{OfferExtractionService, RequestService};

/// Shared state: the two application services.
#[derive(Clone)]
pub struct AppState {
    pub requests: Arc<RequestService>,
    pub extraction: Arc<OfferExtractionService>,
}

/// Build the application router.
///
/// Kept separate from `main` so tests can drive the full HTTP surface
/// in-process.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/requests",
            get(handlers::list_requests).post(handlers::create_request),
        )
        .route("/requests/:id", get(handlers::get_request))
        .route("/requests/:id/status", patch(handlers::update_request_status))
        .route("/offers/parse", post(handlers::parse_offer))
        .layer(TraceLayer::new_for_http())
        // Browser frontend runs on another origin (localhost:3000)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
