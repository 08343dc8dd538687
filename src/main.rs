use std::sync::Arc;

use procurement_api::api::{self, AppState};
use procurement_api::clients::OpenAiClient;
use procurement_api::{
    AppConfig, CommodityService, InMemoryRequestStore, OfferExtractionService, RequestService,
};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging with a local-time format
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // Load configuration
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // Wire services: one shared store, one model client
    let store = Arc::new(InMemoryRequestStore::new());
    let requests = Arc::new(RequestService::new(store, CommodityService::new()));
    let model_client = Arc::new(OpenAiClient::new(config.openai.clone()));
    let extraction = Arc::new(OfferExtractionService::new(model_client));

    let app = api::router(AppState {
        requests,
        extraction,
    });

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET   /health");
    info!("  GET   /requests            - list procurement requests");
    info!("  POST  /requests            - create a procurement request");
    info!("  GET   /requests/:id");
    info!("  PATCH /requests/:id/status");
    info!("  POST  /offers/parse        - parse an offer PDF");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
