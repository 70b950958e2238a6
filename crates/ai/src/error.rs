//! Flow invocation error types.

use kisan_core::{SchemaViolation, ValidationError};
use thiserror::Error;

/// Errors raised while invoking a flow.
///
/// Only `InvalidInput` is meant to be shown to the user verbatim; every other
/// variant collapses to the flow's generic failure message at the edge.
#[derive(Debug, Error)]
pub enum AiError {
    /// The request failed schema validation. No provider call was made.
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    /// Missing API key for a provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider id not present in the catalog.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Transport, HTTP or API failure from the model provider.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider answered, but not with a parseable JSON object.
    #[error("Provider returned no structured output: {0}")]
    NoStructuredOutput(String),

    /// The reply parsed but does not satisfy the flow's output schema.
    #[error("{0}")]
    OutputSchema(#[from] SchemaViolation),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True when the caller sent a bad request rather than the flow failing.
    pub fn is_input_error(&self) -> bool {
        matches!(self, AiError::InvalidInput(_))
    }
}

/// Error code for programmatic handling by API consumers.
impl AiError {
    pub fn code(&self) -> &'static str {
        match self {
            AiError::InvalidInput(_) => "INVALID_INPUT",
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::UnknownProvider(_) => "UNKNOWN_PROVIDER",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::NoStructuredOutput(_) => "NO_STRUCTURED_OUTPUT",
            AiError::OutputSchema(_) => "OUTPUT_SCHEMA_MISMATCH",
            AiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
