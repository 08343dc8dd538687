pub mod openai;

pub use openai::{OpenAiClient, OpenAiError};

use async_trait::async_trait;
use serde_json::Value;

/// Document-understanding collaborator.
///
/// Takes the raw bytes of a vendor offer and returns the loosely-typed JSON
/// record that the extraction service maps into a structured result. The
/// seam exists so the service can be exercised with a fake in tests.
#[async_trait]
pub trait OfferModelClient: Send + Sync {
    async fn extract_offer(&self, filename: &str, document: &[u8]) -> Result<Value, OpenAiError>;
}
