use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::CoreError;
use thiserror::Error;
use tracing::error;

/// Per-request failure rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

/// Every core failure surfaces as a server error, an out-of-range index included.
impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        let message = match &e {
            CoreError::Range(detail) => format!("Requested index is out of range! ({detail})"),
            other => other.to_string(),
        };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<CoreError> for StartupError {
    fn from(e: CoreError) -> Self {
        StartupError::InvalidConfig(e.to_string())
    }
}
