use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gateway::{ActionResult, GatewayError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Renders a gateway [`ActionResult`] as JSON with its HTTP-like status.
#[derive(Debug)]
pub struct ActionResponse<T>(pub ActionResult<T>);

impl<T: Serialize> IntoResponse for ActionResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        error!(status = %self.status, error = self.error, detail = ?self.detail, "request failed");
        (self.status, Json(serde_json::json!({"error": self.error, "detail": self.detail}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
