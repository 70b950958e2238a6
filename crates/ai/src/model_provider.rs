//! The model-provider seam.
//!
//! A provider takes a rendered prompt plus the output schema and returns the
//! model's structured reply as JSON. Validation of that reply is the
//! invoker's job, not the provider's.

use async_trait::async_trait;
use kisan_core::schema::ObjectSchema;
use log::debug;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

use crate::error::AiError;
use crate::prompt_template::RenderedPrompt;

/// One structured-generation call.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Flow name, for logging.
    pub flow: &'static str,
    pub prompt: RenderedPrompt,
    pub output_schema: ObjectSchema,
}

/// A hosted or local language model that can answer with JSON.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Catalog id of the provider (e.g. `gemini`).
    fn id(&self) -> &str;

    /// Model used for generation.
    fn model(&self) -> &str;

    /// Send the prompt and return the reply as a JSON object.
    async fn generate(&self, request: &GenerateRequest) -> Result<Value, AiError>;
}

/// Send a JSON request and return the decoded JSON body.
///
/// Non-success statuses become `AiError::Provider` with the status and body.
/// Transport errors drop the URL, which may carry credentials.
pub(crate) async fn send_json(
    provider_id: &str,
    request: RequestBuilder,
) -> Result<Value, AiError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            AiError::provider(format!("{}: request timed out", provider_id))
        } else {
            AiError::provider(format!(
                "{}: request failed: {}",
                provider_id,
                e.without_url()
            ))
        }
    })?;

    let status = response.status();
    debug!("{} responded with HTTP {}", provider_id, status);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AiError::provider(format!(
            "{}: invalid or missing API key (HTTP {})",
            provider_id, status
        )));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(AiError::provider(format!("{}: rate limited", provider_id)));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AiError::provider(format!(
            "{}: HTTP {} - {}",
            provider_id,
            status,
            api_error_message(&body).unwrap_or(body)
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| {
            AiError::provider(format!(
                "{}: failed to read response: {}",
                provider_id,
                e.without_url()
            ))
        })
}

/// Pull `error.message` out of a JSON error body. Gemini and OpenAI agree on this shape.
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Parse the model's reply text into a JSON object.
///
/// Models occasionally wrap JSON in a Markdown fence even in JSON mode; the
/// fence is stripped. Anything that is not a JSON object is rejected.
pub fn parse_structured_reply(text: &str) -> Result<Value, AiError> {
    let trimmed = strip_code_fence(text.trim());
    if trimmed.is_empty() {
        return Err(AiError::NoStructuredOutput("empty reply".to_string()));
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| AiError::NoStructuredOutput(format!("reply is not JSON: {}", e)))?;
    if !value.is_object() {
        return Err(AiError::NoStructuredOutput(
            "reply is not a JSON object".to_string(),
        ));
    }
    Ok(value)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = match body.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &body[4..],
        _ => body,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}
