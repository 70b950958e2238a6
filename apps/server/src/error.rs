use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kisan_ai::{AiError, Flow};
use kisan_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    /// A flow invocation failed. `failure_message` is what the user sees
    /// unless the request itself was invalid.
    #[error("{flow} failed: {source}")]
    Flow {
        flow: &'static str,
        failure_message: &'static str,
        #[source]
        source: AiError,
    },
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn flow<F: Flow>(source: AiError) -> Self {
        ApiError::Flow {
            flow: F::NAME,
            failure_message: F::FAILURE_MESSAGE,
            source,
        }
    }
}

/// Details stay in the log; paths and parse errors are not returned.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Flow {
                source: AiError::InvalidInput(validation),
                ..
            } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INVALID_INPUT",
                    message: validation.user_message().to_string(),
                    field: validation.field().map(str::to_string),
                },
            ),
            ApiError::Flow {
                flow,
                failure_message,
                source,
            } => {
                tracing::error!(flow = *flow, code = source.code(), error = %source, "Flow failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "FLOW_FAILED",
                        message: failure_message.to_string(),
                        field: None,
                    },
                )
            }
            ApiError::Core(_) | ApiError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: INTERNAL_ERROR_MESSAGE.to_string(),
                        field: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
