//! The inference service: `POST /sentiment` over a frozen [SentimentPipeline].

use std::{path::Path, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::pipelines::text_classification::{ArtifactError, Prediction, SentimentPipeline};

/// Service errors and their HTTP mapping
pub mod error;

pub use error::ApiError;

/// The default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Whether the artifacts are usable
#[derive(Debug)]
pub enum ModelState {
    /// Artifacts loaded
    Ready(SentimentPipeline),

    /// Loading failed; holds the reason
    Unavailable(String),
}

/// Immutable state shared by every request
#[derive(Debug)]
pub struct ServiceContext {
    state: ModelState,
}

impl ServiceContext {
    /// A context serving the given pipeline
    pub fn ready(pipeline: SentimentPipeline) -> Self {
        Self {
            state: ModelState::Ready(pipeline),
        }
    }

    /// A context in which every prediction fails
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable(reason.into()),
        }
    }

    /// Load the artifacts, failing on error
    pub fn try_load(artifact_dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let pipeline = SentimentPipeline::load(artifact_dir.as_ref())?;

        log::info!(
            "Loaded models from {} ({} features)",
            artifact_dir.as_ref().display(),
            pipeline.vectorizer().n_features()
        );

        Ok(Self::ready(pipeline))
    }

    /// Load the artifacts. A failure is logged and the service keeps running in the
    /// unavailable state, so each prediction request fails on its own.
    pub fn load(artifact_dir: impl AsRef<Path>) -> Self {
        match Self::try_load(artifact_dir) {
            Ok(context) => context,
            Err(err) => {
                log::error!("Error loading models: {}", err);
                Self::unavailable(err.to_string())
            }
        }
    }

    /// The current model state
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Score one text
    pub fn predict(&self, text: &str) -> Result<Prediction, ApiError> {
        match &self.state {
            ModelState::Ready(pipeline) => Ok(pipeline.predict(text)?),
            ModelState::Unavailable(reason) => Err(ApiError::Unavailable(reason.clone())),
        }
    }
}

/// The request body of `POST /sentiment`
#[derive(Debug, Deserialize)]
pub struct TextInput {
    /// The text to score
    pub text: String,
}

/// Build the service router
pub fn router(context: Arc<ServiceContext>) -> Router {
    Router::new()
        .route("/sentiment", post(predict_sentiment))
        .route("/health", get(health))
        .with_state(context)
}

async fn predict_sentiment(
    State(context): State<Arc<ServiceContext>>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let Json(input) = payload?;

    let prediction = context.predict(&input.text)?;

    log::debug!(
        "Scored text as {} ({:.4}, {})",
        prediction.sentiment,
        prediction.score,
        prediction.confidence
    );

    Ok(Json(prediction))
}

async fn health(State(context): State<Arc<ServiceContext>>) -> (StatusCode, Json<serde_json::Value>) {
    match context.state() {
        ModelState::Ready(_) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        ModelState::Unavailable(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "error": reason })),
        ),
    }
}
