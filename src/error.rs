//! Error handling
//!
//! `AppError` covers transport-level failures only. Prediction failures are
//! reported inside a 200 body by the predict handler.

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    // Request body failed schema validation
    ValidationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => {
                tracing::debug!("Rejected request body: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, msg.as_str())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
