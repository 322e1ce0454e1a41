// Gemini HTTP client

use std::time::Duration;

use async_trait::async_trait;
use visioncraft_core::{
    ComposedRequest, GeneratedImage, GenerationError, GenerationOutcome, ImageGenerator,
    QualityTier,
};

use crate::classify::{classify_http_error, classify_message};
use crate::errors::ClientError;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// Public Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Image models can take a while; this bounds a single attempt
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// Read `GEMINI_BASE_URL` and `GEMINI_TIMEOUT_SECS`, falling back to defaults
    pub fn from_env() -> Result<Self, ClientError> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("GEMINI_TIMEOUT_SECS") {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ClientError::InvalidConfig {
                    name: "GEMINI_TIMEOUT_SECS",
                    value: timeout.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Gemini client for advertisement image generation
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with the default timeout
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "https://generativelanguage.googleapis.com/v1beta")
    pub fn new(base_url: String) -> Result<Self, ClientError> {
        Self::with_config(GeminiConfig {
            base_url,
            ..GeminiConfig::default()
        })
    }

    pub fn with_config(config: GeminiConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(config.base_url));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for a model
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Send one generation request.
    ///
    /// Returns the first inline image of the response as a PNG data URL, or a
    /// classified error. Never retries.
    pub async fn invoke(&self, request: ComposedRequest, credential: &str) -> GenerationOutcome {
        if credential.trim().is_empty() {
            return Err(GenerationError::CredentialMissing);
        }

        let tier = request.quality;
        let body = GenerateContentRequest::from(&request);

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header(API_KEY_HEADER, credential.trim())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model = %request.model, "Gemini request failed: {}", e);
                transport_error(e, tier)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::error!(model = %request.model, "failed to read Gemini response: {}", e);
            transport_error(e, tier)
        })?;

        if !status.is_success() {
            let error = classify_http_error(status.as_u16(), &text, tier);
            tracing::error!(model = %request.model, status = status.as_u16(), "Gemini returned an error: {}", error);
            return Err(error);
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(model = %request.model, "invalid Gemini response: {}", e);
            GenerationError::failed(format!("Invalid response from image service: {}", e))
        })?;

        match parsed.first_inline_image() {
            Some(blob) => {
                tracing::info!(
                    model = %request.model,
                    bytes = blob.data.len(),
                    mime_type = %blob.mime_type,
                    "Gemini generation successful"
                );
                Ok(GeneratedImage::from_png_base64(&blob.data))
            }
            None => {
                tracing::warn!(
                    model = %request.model,
                    parts = parsed.first_candidate_parts().len(),
                    "Gemini response contained no image"
                );
                Err(GenerationError::NoImageProduced)
            }
        }
    }
}

/// Classify a reqwest failure on its message alone; the URL would feed
/// host and port digits into the substring heuristics
fn transport_error(error: reqwest::Error, tier: QualityTier) -> GenerationError {
    classify_message(&error.without_url().to_string(), tier)
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, request: ComposedRequest, credential: &str) -> GenerationOutcome {
        self.invoke(request, credential).await
    }
}
