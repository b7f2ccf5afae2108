//! Summarization service
//!
//! HTTP front for the model server: validates submitted text, wraps it in the
//! summary prompt and returns the extracted summary.

pub mod error;
pub mod form;
pub mod handlers;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Settings;
use crate::llm::{build_backend, ModelBackend};

pub use error::ApiError;
pub use handlers::SummaryResponse;

/// Shared handler state. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn ModelBackend>,
}

/// Build the service router around a model backend.
pub fn router(settings: &Settings, backend: Arc<dyn ModelBackend>) -> Result<Router> {
    let cors = cors_layer(&settings.server.allowed_origins)?;

    Ok(Router::new()
        .route("/summarize/", post(handlers::summarize))
        .route("/summarize", post(handlers::summarize))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { backend }))
}

/// Browser access for the configured origins, with credentials.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid allowed origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    // Wildcards are not allowed together with credentials, so mirror instead.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Run the service on the configured address until Ctrl-C.
pub async fn serve(settings: &Settings) -> Result<()> {
    let backend = build_backend(settings)?;
    let app = router(settings, backend)?;

    let listener = TcpListener::bind(&settings.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server.bind))?;

    info!(
        "Summarization service listening on {} (model {} at {})",
        listener.local_addr()?,
        settings.model.name,
        settings.model.endpoint
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Summarization service failed")?;

    info!("Summarization service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
