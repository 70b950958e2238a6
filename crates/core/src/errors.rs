//! Core error types for Project Kisan.
//!
//! Validation failures on flow input are kept apart from schema violations on
//! model replies so callers can surface the former next to a form field and
//! treat the latter as a failed invocation.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Reply does not match schema: {0}")]
    Schema(#[from] SchemaViolation),

    #[error("Price data error: {0}")]
    PriceData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for flow requests.
///
/// Every variant names the offending field so the caller can render the
/// message inline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: String, message: String },

    #[error("Field '{field}' is invalid: {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ValidationError {
    /// Name of the field that failed, if the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { field, .. }
            | ValidationError::InvalidField { field, .. } => Some(field.as_str()),
            ValidationError::InvalidInput(_) => None,
        }
    }

    /// Message suitable for showing next to the field.
    pub fn user_message(&self) -> &str {
        match self {
            ValidationError::MissingField { message, .. }
            | ValidationError::InvalidField { message, .. } => message.as_str(),
            ValidationError::InvalidInput(message) => message.as_str(),
        }
    }
}

/// A model reply that does not satisfy the declared output schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("{schema}: expected a JSON object at '{path}', found {found}")]
    NotAnObject {
        schema: String,
        path: String,
        found: &'static str,
    },

    #[error("{schema}: required field '{path}' is missing")]
    MissingField { schema: String, path: String },

    #[error("{schema}: field '{path}' should be {expected}, found {found}")]
    WrongType {
        schema: String,
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{schema}: field '{path}' should have {expected} items, found {found}")]
    WrongLength {
        schema: String,
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("{schema}: field '{path}' should be {expected:?}, found {found:?}")]
    UnexpectedValue {
        schema: String,
        path: String,
        expected: String,
        found: String,
    },
}

impl SchemaViolation {
    /// Path of the offending field (e.g. `priceTrend[3].price`).
    pub fn path(&self) -> &str {
        match self {
            SchemaViolation::NotAnObject { path, .. }
            | SchemaViolation::MissingField { path, .. }
            | SchemaViolation::WrongType { path, .. }
            | SchemaViolation::WrongLength { path, .. }
            | SchemaViolation::UnexpectedValue { path, .. } => path.as_str(),
        }
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
