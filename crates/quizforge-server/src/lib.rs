//! quizforge-server — HTTP API over the quiz engine.
//!
//! Routes:
//! - `GET  /health`
//! - `POST /questions/generate`
//! - `GET  /questions/:question_id/reference`
//! - `POST /answers/evaluate`

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use quizforge_core::config::ServerConfig;
use quizforge_core::QuizEngine;

pub mod error;
pub mod routes;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QuizEngine>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    // Credentials rule out wildcard methods/headers, so mirror the request instead.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the router with CORS and request tracing.
pub fn build_app(engine: Arc<QuizEngine>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/questions/generate", post(routes::generate_questions))
        .route(
            "/questions/:question_id/reference",
            get(routes::reference_answers),
        )
        .route("/answers/evaluate", post(routes::evaluate_answer))
        .with_state(AppState { engine })
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Bind to `config.bind` and serve until the process is stopped.
pub async fn serve(engine: Arc<QuizEngine>, config: &ServerConfig) -> Result<()> {
    let app = build_app(engine, config);
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("quizforge listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
