use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::pipelines::text_classification::ModelError;

/// API Error
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The request body is not a valid `{"text": string}` object
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// The artifacts failed to load at startup
    #[error("models are not loaded: {0}")]
    Unavailable(String),

    /// The classifier rejected the input
    #[error("prediction failed: {0}")]
    Prediction(#[from] ModelError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidInput(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail.clone()),
            ApiError::Unavailable(_) | ApiError::Prediction(_) => {
                log::error!("Prediction error: {}", self);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
