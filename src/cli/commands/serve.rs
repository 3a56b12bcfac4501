//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for questions, summaries, and video search.

use super::{build_engine, video_cap};
use crate::cli::Output;
use crate::config::Settings;
use crate::models::Video;
use crate::qa::{QaEngine, QaResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    engine: QaEngine,
    settings: Settings,
}

impl AppState {
    /// Resolve the request URL or the configured default.
    fn resolve_url(&self, url: Option<String>) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
        url.or_else(|| self.settings.youtube.default_url.clone())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "No URL given and no youtube.default_url configured".to_string(),
                    }),
                )
            })
    }
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let engine = build_engine(&settings)?;

    let state = Arc::new(AppState { engine, settings });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/search", post(search))
        .route("/summary", post(summary))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tubeqa API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Ask", "POST /ask");
    Output::kv("Search", "POST /search");
    Output::kv("Summary", "POST /summary");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct AskRequest {
    question: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    max_videos: Option<usize>,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

fn default_max_results() -> usize {
    10
}

#[derive(Deserialize)]
struct SummaryRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<Video>,
    total: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    let url = match state.resolve_url(req.url) {
        Ok(url) => url,
        Err(rejection) => return rejection.into_response(),
    };

    let max_videos = video_cap(&url, req.max_videos, &state.settings);

    // Failures surface inside the response as confidence 0.0, so this
    // handler has no error branch.
    let response: QaResponse = state
        .engine
        .answer_question(&req.question, &url, max_videos)
        .await;

    Json(response).into_response()
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> impl IntoResponse {
    let url = match state.resolve_url(req.url) {
        Ok(url) => url,
        Err(rejection) => return rejection.into_response(),
    };

    let results = state
        .engine
        .search_videos(&req.query, &url, Some(req.max_results))
        .await;

    Json(SearchResponse {
        total: results.len(),
        results,
    })
    .into_response()
}

async fn summary(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummaryRequest>,
) -> impl IntoResponse {
    let url = match state.resolve_url(req.url) {
        Ok(url) => url,
        Err(rejection) => return rejection.into_response(),
    };

    let response = state.engine.get_summary(&url).await;

    Json(response).into_response()
}
