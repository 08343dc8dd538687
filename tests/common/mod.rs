use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use procurement_api::api::{router, AppState};
use procurement_api::clients::{OfferModelClient, OpenAiError};
use procurement_api::{
    CommodityService, InMemoryRequestStore, OfferExtractionService, RequestService,
};
use serde_json::Value;
use tower::ServiceExt;

/// Model client that always returns the same raw record.
pub struct StaticModelClient(pub Value);

#[async_trait]
impl OfferModelClient for StaticModelClient {
    async fn extract_offer(&self, _filename: &str, _document: &[u8]) -> Result<Value, OpenAiError> {
        Ok(self.0.clone())
    }
}

/// Model client that always fails.
pub struct FailingModelClient;

#[async_trait]
impl OfferModelClient for FailingModelClient {
    async fn extract_offer(&self, _filename: &str, _document: &[u8]) -> Result<Value, OpenAiError> {
        Err(OpenAiError::Parse("no JSON object in model reply".to_string()))
    }
}

/// Build the full application router with a fresh store and the given
/// model client.
pub fn app_with_client(client: Arc<dyn OfferModelClient>) -> Router {
    let store = Arc::new(InMemoryRequestStore::new());
    let requests = Arc::new(RequestService::new(store, CommodityService::new()));
    let extraction = Arc::new(OfferExtractionService::new(client));
    router(AppState {
        requests,
        extraction,
    })
}

/// Drive one JSON request through the router.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    read_json(response).await
}

/// Collect a response body as JSON.
pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Hand-built multipart upload with a single `file` part.
pub fn multipart_upload(content_type: &str, payload: &[u8]) -> Request<Body> {
    multipart_upload_named("file", content_type, payload)
}

pub fn multipart_upload_named(
    part_name: &str,
    content_type: &str,
    payload: &[u8],
) -> Request<Body> {
    let boundary = "offer-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{part_name}\"; \
             filename=\"offer.pdf\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/offers/parse")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
