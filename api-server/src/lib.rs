// VisionCraft API server
//
// HTTP surface over the session controller and the Gemini client.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use visioncraft_core::{CredentialProvider, ImageGenerator};

pub mod config;
pub mod handlers;
pub mod telemetry;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn ImageGenerator>,

    /// Server-side key, used when a request carries none
    pub credentials: Arc<dyn CredentialProvider>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ImageGenerator>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            generator,
            credentials,
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    // Configure CORS (allow localhost development)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/formats", get(handlers::formats))
        .route("/api/v1/generate", post(handlers::generate))
        .with_state(state)
        // Json applies its own 2 MB cap unless replaced
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
