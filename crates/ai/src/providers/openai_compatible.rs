//! OpenAI-compatible `chat/completions` adapter.
//!
//! Works against OpenAI itself and any server speaking the same protocol,
//! including a local Ollama (`http://localhost:11434/v1`).

use async_trait::async_trait;
use kisan_core::schema::SchemaDialect;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::AiError;
use crate::model_provider::{parse_structured_reply, send_json, GenerateRequest, ModelProvider};

/// Chat-completions provider using `response_format: json_schema`.
pub struct OpenAiCompatibleProvider {
    id: String,
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        id: &str,
        client: Client,
        base_url: &str,
        model: &str,
        api_key: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            model: model.trim().to_string(),
            api_key,
        }
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub(crate) fn request_body(&self, request: &GenerateRequest) -> Value {
        let mut content = vec![json!({ "type": "text", "text": request.prompt.text })];
        if let Some(media) = &request.prompt.media {
            content.push(json!({
                "type": "image_url",
                "image_url": { "url": media.to_uri_string() }
            }));
        }

        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": content }],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.output_schema.name,
                    "strict": true,
                    "schema": request.output_schema.to_json_schema(SchemaDialect::JsonSchema),
                }
            }
        })
    }

    pub(crate) fn extract_reply(payload: &Value) -> Result<Value, AiError> {
        let message = payload
            .pointer("/choices/0/message")
            .ok_or_else(|| AiError::NoStructuredOutput("response has no choices".to_string()))?;

        if let Some(refusal) = message.get("refusal").and_then(Value::as_str) {
            return Err(AiError::NoStructuredOutput(format!(
                "model refused: {}",
                refusal
            )));
        }

        let text = message
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default();
        parse_structured_reply(text)
    }
}

#[async_trait]
impl ModelProvider for OpenAiCompatibleProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Value, AiError> {
        debug!(
            "{} chat completion for flow {} (model {}, media: {})",
            self.id,
            request.flow,
            self.model,
            request.prompt.media.is_some()
        );

        let mut http = self
            .client
            .post(self.endpoint())
            .json(&self.request_body(request));
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }
        let payload = send_json(&self.id, http).await?;
        Self::extract_reply(&payload)
    }
}
