//! Error responses of the summarization service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::llm::ModelError;

/// Failure of a summarize request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Text is empty")]
    InvalidInput,

    #[error("Field required: {0}")]
    MissingField(&'static str),

    #[error("Invalid form body: {0}")]
    InvalidForm(String),

    #[error("Unsupported content type, expected a form body")]
    UnsupportedMediaType,

    /// Model server failures are not translated for the caller.
    #[error(transparent)]
    Upstream(#[from] ModelError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::MissingField(_) | Self::InvalidForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Self::Upstream(e) = &self {
            error!("Model server call failed: {}", e);
            return (status, "Internal Server Error").into_response();
        }

        warn!("Rejected summarize request: {}", self);
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
