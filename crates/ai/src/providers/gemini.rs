//! Google Gemini `generateContent` adapter.

use async_trait::async_trait;
use kisan_core::schema::SchemaDialect;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use crate::error::AiError;
use crate::model_provider::{parse_structured_reply, send_json, GenerateRequest, ModelProvider};

pub const PROVIDER_ID: &str = "gemini";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider using JSON mode with a response schema.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(client: Client, base_url: &str, model: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            model: model.trim().to_string(),
            api_key,
        }
    }

    pub(crate) fn endpoint(&self) -> String {
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!("{}/{}:generateContent", self.base_url, model_path)
    }

    /// The key travels in a header so it never appears in URLs or their errors.
    pub(crate) fn http_request(&self, request: &GenerateRequest) -> RequestBuilder {
        self.client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&Self::request_body(request))
    }

    pub(crate) fn request_body(request: &GenerateRequest) -> Value {
        let mut parts = vec![json!({ "text": request.prompt.text })];
        if let Some(media) = &request.prompt.media {
            parts.push(json!({
                "inlineData": {
                    "mimeType": media.mime_type,
                    "data": media.data,
                }
            }));
        }

        json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.output_schema.to_json_schema(SchemaDialect::OpenApi),
            }
        })
    }

    /// Concatenate the text parts of the first candidate and parse them.
    pub(crate) fn extract_reply(payload: &Value) -> Result<Value, AiError> {
        let Some(candidate) = payload
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|c| c.first())
        else {
            let reason = payload
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str)
                .unwrap_or("no candidates");
            return Err(AiError::NoStructuredOutput(format!(
                "gemini returned no candidates ({})",
                reason
            )));
        };

        let text: String = candidate
            .pointer("/content/parts")
            .and_then(Value::as_array)
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let finish = candidate
                .get("finishReason")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            return Err(AiError::NoStructuredOutput(format!(
                "gemini candidate has no text (finishReason {})",
                finish
            )));
        }
        parse_structured_reply(&text)
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Value, AiError> {
        debug!(
            "Gemini request for flow {} (model {}, media: {})",
            request.flow,
            self.model,
            request.prompt.media.is_some()
        );

        let payload = send_json(PROVIDER_ID, self.http_request(request)).await?;
        Self::extract_reply(&payload)
    }
}
