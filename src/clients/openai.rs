use async_trait::async_trait;
use base64::Engine as _;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::OfferModelClient;
use crate::config::OpenAiConfig;
use crate::service::commodity::COMMODITY_GROUPS;

/// Errors from the offer extraction call. Single attempt, no retries.
#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("parse error: {0}")]
    Parse(String),
}

const SYSTEM_PROMPT: &str = "You are an expert procurement extraction engine. \
Given a vendor offer (a quote) in German or English, you extract the commercial \
information needed to create a procurement request. You MUST strictly follow the \
JSON format requested by the user. If you are unsure about a field, use null. \
Never invent values that are not supported by the document.";

/// Instruction part of the user message; the PDF itself travels as a
/// separate file content part.
fn instruction_text() -> String {
    let groups = COMMODITY_GROUPS.join("\n- ");
    format!(
        r#"You receive a vendor offer (quote) as an attached PDF document.

Your goal is to extract all commercial information needed for a procurement request.

Return ONLY valid JSON (no explanation, no markdown, no comments) with exactly these fields:

{{
  "requestor_name": string or null,      // person the offer is addressed to, if any
  "vendor_name": string or null,         // legal/vendor name as written in the offer
  "vendor_vat_id": string or null,       // VAT ID / Umsatzsteuer-ID, e.g. "DE123456789"
  "department": string or null,          // internal department the offer is addressed to
  "title": string or null,               // short description of what is being procured
  "order_lines": [
    {{
      "position_description": string,    // free-text product/service description
      "unit_price": number,              // numeric unit price, no currency symbol
      "amount": number,                  // quantity (e.g. 1, 5, 10)
      "unit": string,                    // unit label, e.g. "Stk", "pieces", "licenses"
      "total_price": number              // unit_price * amount
    }}
  ],
  "total_cost": number or null,          // overall offer total; use the explicit total if present, else the sum of line totals
  "commodity_group_suggestion": string or null
}}

Important rules:
- The JSON must be syntactically valid.
- Do NOT include any currency symbols, thousands separators or text in numeric fields.
- Example: write 2100, not "€2.100,00" or "2100 EUR".
- Extract ALL relevant line items (products, services, shipping) that have a quantity and price.
- If the document shows multiple alternative products/variants, include each as a separate order line.
- If a field is missing in the document, set it to null.
- For title: use a concise summary of the main thing being purchased (e.g. the main product name).
- For commodity_group_suggestion: pick exactly one of the following labels:
- {groups}"#
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    File { file: FilePayload },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct FilePayload {
    filename: String,
    file_data: String, // data URL carrying the base64-encoded PDF
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Thin wrapper around the OpenAI chat completions API for offer
/// extraction. The PDF is uploaded as-is; no local text extraction.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl OfferModelClient for OpenAiClient {
    async fn extract_offer(&self, filename: &str, document: &[u8]) -> Result<Value, OpenAiError> {
        if self.config.api_key.is_empty() {
            return Err(OpenAiError::Config("OPENAI_API_KEY is not set".to_string()));
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(document);
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::File {
                            file: FilePayload {
                                filename: filename.to_string(),
                                file_data: format!("data:application/pdf;base64,{encoded}"),
                            },
                        },
                        ContentPart::Text {
                            text: instruction_text(),
                        },
                    ]),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(
            %url,
            model = %self.config.model,
            filename,
            bytes = document.len(),
            "Requesting offer extraction"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, body });
        }

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| OpenAiError::Parse("model returned no content".to_string()))?;

        let object = extract_json_object(strip_fences(content))?;
        serde_json::from_str(object)
            .map_err(|e| OpenAiError::Parse(format!("invalid JSON from model: {e}")))
    }
}

/// Strip markdown fences the model may add despite instructions.
fn strip_fences(content: &str) -> &str {
    content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Reduce the reply to the outermost `{...}` object; some models prepend
/// reasoning text around the JSON.
fn extract_json_object(s: &str) -> Result<&str, OpenAiError> {
    let start = s
        .find('{')
        .ok_or_else(|| OpenAiError::Parse("no JSON object in model reply".to_string()))?;
    let end = s
        .rfind('}')
        .ok_or_else(|| OpenAiError::Parse("no JSON object in model reply".to_string()))?;
    if end <= start {
        return Err(OpenAiError::Parse(
            "malformed JSON in model reply".to_string(),
        ));
    }
    Ok(&s[start..=end])
}
