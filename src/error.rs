use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable kind reported in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::UpstreamUnavailable(_) => "upstream_unavailable",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = match &self {
            AppError::InvalidInput(msg) => {
                tracing::info!("Rejected request: {}", msg);
                msg.clone()
            }
            // Already logged with the provider fault when it was classified.
            AppError::UpstreamUnavailable(msg) => msg.clone(),
            // Internal detail stays in the logs.
            AppError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                "internal server error".to_string()
            }
        };

        (
            self.status(),
            Json(ErrorResponse {
                detail,
                error: self.code().to_string(),
            }),
        )
            .into_response()
    }
}
