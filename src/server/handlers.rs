//! Request handlers

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::llm::build_summary_prompt;
use crate::server::error::ApiError;
use crate::server::form::TextForm;
use crate::server::AppState;

/// Successful summarize response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// `POST /summarize/`
pub async fn summarize(
    State(state): State<AppState>,
    TextForm { text }: TextForm,
) -> Result<Json<SummaryResponse>, ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::InvalidInput);
    }

    let prompt = build_summary_prompt(&text);
    debug!("Built prompt of {} chars", prompt.len());

    let envelope = state.backend.generate(&prompt).await?;
    let summary = envelope.summary();

    info!(
        "Summarized {} chars of input into {} chars",
        text.len(),
        summary.len()
    );

    Ok(Json(SummaryResponse { summary }))
}
