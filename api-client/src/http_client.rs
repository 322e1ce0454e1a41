// HTTP client for the VisionCraft API

use crate::errors::ApiError;
use serde::Deserialize;
use std::env;
use visioncraft_core::{
    strip_transport_prefix, AspectRatio, ErrorCode, GenerateRequest, GenerateResponse,
    GeneratedImage, ProcessResult,
};

/// Header carrying the caller's Gemini API key
const API_KEY_HEADER: &str = "x-api-key";

fn get_api_base_url() -> String {
    env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

fn network_error() -> ApiError {
    ApiError::NetworkError(ErrorCode::ServerError.to_message().to_string())
}

fn parse_error() -> ApiError {
    ApiError::NetworkError("Failed to parse the server response.".to_string())
}

/// Output format preset as listed by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatInfo {
    pub id: String,
    pub label: String,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Deserialize)]
struct FormatsResponse {
    formats: Vec<FormatInfo>,
}

/// Generate an advertisement via the API server
///
/// # Arguments
/// * `request` - Description, format, tier and encoded images
/// * `api_key` - Gemini API key to use instead of the server's own
///
/// # Returns
/// The generated image and processing result on success
pub async fn generate_advertisement(
    request: GenerateRequest,
    api_key: Option<&str>,
) -> Result<(GeneratedImage, ProcessResult), ApiError> {
    let client = reqwest::Client::new();
    let api_base_url = get_api_base_url();

    let mut builder = client
        .post(format!("{}/api/v1/generate", api_base_url))
        .json(&request);
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }

    let response = builder.send().await.map_err(|_| network_error())?;

    if response.status().is_success() {
        let generate_response: GenerateResponse =
            response.json().await.map_err(|_| parse_error())?;

        match generate_response.image_url {
            Some(image_url) => Ok((
                GeneratedImage::from_png_base64(strip_transport_prefix(&image_url)),
                generate_response.result,
            )),
            None => Err(ApiError::from_process_result(generate_response.result)),
        }
    } else {
        Err(ApiError::ServerError(format!("HTTP {}", response.status())))
    }
}

/// Fetch the output format presets
pub async fn list_formats() -> Result<Vec<FormatInfo>, ApiError> {
    let client = reqwest::Client::new();
    let api_base_url = get_api_base_url();
    let response = client
        .get(format!("{}/api/v1/formats", api_base_url))
        .send()
        .await
        .map_err(|_| network_error())?;

    if response.status().is_success() {
        let formats: FormatsResponse = response.json().await.map_err(|_| parse_error())?;
        Ok(formats.formats)
    } else {
        Err(ApiError::ServerError(format!("HTTP {}", response.status())))
    }
}
