// API handlers

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use visioncraft_core::{
    CredentialProvider, DesignForm, ErrorCode, GenerateRequest, GenerateResponse,
    GenerationError, ProcessResult, SessionController, SessionState, StaticCredentialProvider,
    SubmitRejection, FORMAT_PRESETS,
};

use crate::AppState;

/// Header carrying a per-request Gemini API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// GET /api/v1/health - Health check endpoint
pub async fn health() -> Response {
    let health_status = json!({
        "status": "healthy",
        "service": "visioncraft-api",
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, Json(health_status)).into_response()
}

/// GET /api/v1/formats - Output format presets
pub async fn formats() -> Response {
    let presets: Vec<_> = FORMAT_PRESETS
        .iter()
        .map(|preset| {
            json!({
                "id": preset.id,
                "label": preset.label,
                "aspect_ratio": preset.aspect_ratio,
            })
        })
        .collect();

    (StatusCode::OK, Json(json!({ "formats": presets }))).into_response()
}

/// POST /api/v1/generate - Generate an advertisement image
///
/// Always answers 200; the outcome is carried in `result`.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<GenerateRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        tracing::warn!("Validation failed: {}", e);
        let response = GenerateResponse::error(e.to_process_result());
        return (StatusCode::OK, Json(response)).into_response();
    }

    let credentials = resolve_credentials(&state, &headers).await;
    let mut controller = SessionController::new(credentials);
    let form = design_form(payload);

    let response = match controller.generate(&form, state.generator.as_ref()).await {
        Ok(SessionState::Succeeded(image)) => GenerateResponse::success(image.clone()),
        Ok(SessionState::Failed(error)) => {
            tracing::error!(quality = ?form.quality, "Generation failed: {}", error);
            GenerateResponse::error(error.to_process_result())
        }
        Ok(other) => {
            tracing::error!("Generation ended in unexpected state: {:?}", other);
            GenerateResponse::error(ProcessResult::error(ErrorCode::ServerError))
        }
        Err(SubmitRejection::CredentialMissing) => {
            tracing::warn!("No API key available for generation");
            GenerateResponse::error(GenerationError::CredentialMissing.to_process_result())
        }
        Err(rejection) => {
            tracing::warn!("Generation rejected: {}", rejection);
            GenerateResponse::error(
                ProcessResult::error(ErrorCode::ServerError).with_message(rejection.to_string()),
            )
        }
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// A key in the request header wins over the server environment.
///
/// The server key is copied into a per-request provider, so an invalidation
/// during one request never clears the key another request is about to use.
async fn resolve_credentials(state: &AppState, headers: &HeaderMap) -> Arc<dyn CredentialProvider> {
    let header_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty());

    if let Some(key) = header_key {
        return Arc::new(StaticCredentialProvider::new(key));
    }

    if !state.credentials.has_credential().await {
        if let Err(e) = state.credentials.select_credential().await {
            tracing::debug!("Server API key unavailable: {}", e);
        }
    }

    match state.credentials.credential() {
        Some(key) => Arc::new(StaticCredentialProvider::new(key)),
        None => Arc::new(StaticCredentialProvider::empty()),
    }
}

fn design_form(payload: GenerateRequest) -> DesignForm {
    let mut form = DesignForm::new();
    form.description = payload.description;
    form.aspect_ratio = payload.aspect_ratio;
    form.quality = payload.quality;
    if let Some(product) = payload.product_image {
        form.images.set_product(product.into_encoded());
    }
    if let Some(logo) = payload.logo_image {
        form.images.set_logo(logo.into_encoded());
    }
    form
}
