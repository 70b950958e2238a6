//! Deterministic provider for tests. Makes no network calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AiError;
use crate::model_provider::{parse_structured_reply, GenerateRequest, ModelProvider};

pub const PROVIDER_ID: &str = "fake";

/// What the fake answers with on every call.
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// A structured reply, returned as-is.
    Json(Value),
    /// Raw model text, parsed the way real providers parse it.
    Text(String),
    /// A provider failure.
    Error(String),
}

/// A fake model provider returning a canned reply and recording calls.
pub struct FakeModelProvider {
    reply: FakeReply,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl FakeModelProvider {
    pub fn new(reply: FakeReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Always answer with `reply`.
    pub fn with_reply(reply: Value) -> Self {
        Self::new(FakeReply::Json(reply))
    }

    /// Always answer with raw model text.
    pub fn with_text(text: &str) -> Self {
        Self::new(FakeReply::Text(text.to_string()))
    }

    /// Always fail as if the network call failed.
    pub fn with_error(message: &str) -> Self {
        Self::new(FakeReply::Error(message.to_string()))
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl ModelProvider for FakeModelProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Value, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.reply {
            FakeReply::Json(value) => Ok(value.clone()),
            FakeReply::Text(text) => parse_structured_reply(text),
            FakeReply::Error(message) => Err(AiError::provider(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt_template::RenderedPrompt;
    use kisan_core::schema::ObjectSchema;
    use serde_json::json;

    fn request() -> GenerateRequest {
        GenerateRequest {
            flow: "predictMarketPrice",
            prompt: RenderedPrompt::text("Crop Name: Wheat"),
            output_schema: ObjectSchema::new("PredictMarketPriceOutput"),
        }
    }

    #[tokio::test]
    async fn test_fake_records_calls() {
        let fake = FakeModelProvider::with_reply(json!({ "advice": "Water less." }));
        assert_eq!(fake.calls(), 0);
        assert!(fake.last_request().is_none());

        let reply = fake.generate(&request()).await.unwrap();
        assert_eq!(reply["advice"], "Water less.");
        assert_eq!(fake.calls(), 1);
        assert_eq!(fake.last_request().unwrap().prompt.text, "Crop Name: Wheat");
    }

    #[tokio::test]
    async fn test_fake_error() {
        let fake = FakeModelProvider::with_error("connection reset");
        let err = fake.generate(&request()).await.unwrap_err();
        assert_eq!(err.code(), "PROVIDER_ERROR");
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_fake_text_is_parsed() {
        let fake = FakeModelProvider::with_text("not json");
        let err = fake.generate(&request()).await.unwrap_err();
        assert_eq!(err.code(), "NO_STRUCTURED_OUTPUT");
    }
}
