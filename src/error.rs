use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::generation::GenerationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Method not allowed.")]
    MethodNotAllowed,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Generation(e) => {
                tracing::error!(error = %e, "Generation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = axum::Json(json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}
