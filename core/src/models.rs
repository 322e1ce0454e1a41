// Core data models for VisionCraft

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model used for the standard (fast) quality tier
pub const STANDARD_MODEL: &str = "gemini-2.5-flash-image";

/// Model used for the pro (high fidelity) quality tier
pub const PRO_MODEL: &str = "gemini-3-pro-image-preview";

/// Generation attempt ID (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationId(pub uuid::Uuid);

impl GenerationId {
    /// Generate a new random attempt ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for GenerationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Output aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    Story,
    #[serde(rename = "16:9")]
    Widescreen,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::Story,
        AspectRatio::Widescreen,
    ];

    /// Wire token sent to the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Story => "9:16",
            AspectRatio::Widescreen => "16:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown aspect ratio token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported aspect ratio: {0}")]
pub struct ParseAspectRatioError(pub String);

impl FromStr for AspectRatio {
    type Err = ParseAspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s)
            .ok_or_else(|| ParseAspectRatioError(s.to_string()))
    }
}

/// Quality tier selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    #[default]
    Standard,
    Pro,
}

impl QualityTier {
    pub fn from_pro_flag(use_pro: bool) -> Self {
        if use_pro {
            QualityTier::Pro
        } else {
            QualityTier::Standard
        }
    }

    pub fn is_pro(&self) -> bool {
        matches!(self, QualityTier::Pro)
    }

    /// Provider model identifier for this tier
    pub fn model_id(&self) -> &'static str {
        match self {
            QualityTier::Standard => STANDARD_MODEL,
            QualityTier::Pro => PRO_MODEL,
        }
    }

    /// Hint shown alongside a permission failure
    pub fn permission_hint(&self) -> &'static str {
        match self {
            QualityTier::Pro => "The Pro model requires a billed Google Cloud project.",
            QualityTier::Standard => "Please check your API key.",
        }
    }
}

/// Design brief for one generation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBrief {
    /// Free-text scene description
    pub description: String,

    /// Requested output aspect ratio
    pub aspect_ratio: AspectRatio,

    /// Standard or pro model
    pub quality: QualityTier,
}

impl GenerationBrief {
    pub fn new(description: impl Into<String>, aspect_ratio: AspectRatio, quality: QualityTier) -> Self {
        Self {
            description: description.into(),
            aspect_ratio,
            quality,
        }
    }

    /// Validate brief content
    pub fn validate(&self) -> Result<(), crate::validation::ValidationError> {
        crate::validation::validate_description(&self.description)
    }
}

/// Social media format preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub aspect_ratio: AspectRatio,
}

/// Format presets offered by the form, default first
pub const FORMAT_PRESETS: [FormatPreset; 4] = [
    FormatPreset {
        id: "insta-post",
        label: "Insta Post",
        aspect_ratio: AspectRatio::Square,
    },
    FormatPreset {
        id: "insta-story",
        label: "Insta Story",
        aspect_ratio: AspectRatio::Story,
    },
    FormatPreset {
        id: "insta-reel",
        label: "Insta Reel",
        aspect_ratio: AspectRatio::Story,
    },
    FormatPreset {
        id: "fb-post",
        label: "Facebook Post",
        aspect_ratio: AspectRatio::Landscape,
    },
];

impl FormatPreset {
    pub fn default_preset() -> &'static FormatPreset {
        &FORMAT_PRESETS[0]
    }

    /// Look up a preset by id
    pub fn find(id: &str) -> Option<&'static FormatPreset> {
        FORMAT_PRESETS.iter().find(|preset| preset.id == id)
    }
}

/// Generated advertisement image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// `data:image/png;base64,...` URI
    pub data_url: String,

    /// Generation timestamp (Unix timestamp)
    pub generated_at: i64,
}

impl GeneratedImage {
    /// Suggested file name for downloads
    pub const DOWNLOAD_FILE_NAME: &'static str = "vision-craft-output.png";

    const DATA_URL_PREFIX: &'static str = "data:image/png;base64,";

    /// Wrap a raw base64 payload returned by the provider
    pub fn from_png_base64(payload: &str) -> Self {
        Self {
            data_url: format!("{}{}", Self::DATA_URL_PREFIX, payload),
            generated_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Base64 payload without the data URL header
    pub fn payload(&self) -> &str {
        crate::composer::strip_transport_prefix(&self.data_url)
    }

    /// Decode to PNG bytes (for downloads)
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, crate::errors::GenerationError> {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(self.payload())
            .map_err(|e| crate::errors::GenerationError::UnreadableFile(e.to_string()))
    }
}

/// Result of one generation attempt
pub type GenerationOutcome = Result<GeneratedImage, crate::errors::GenerationError>;

/// Status level for messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusLevel {
    /// Completed normally
    Info,
    /// Input problem, the user can fix it and resubmit
    Warning,
    /// Generation failed
    Error,
}

/// Codes for processing results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    GenerationOk,

    // Validation (WARNING)
    ValidationEmpty,
    ValidationTextLimit,
    MissingProductImage,
    UnreadableFile,
    UnsupportedMimeType,

    // Provider (ERROR)
    NoImageProduced,
    PermissionDenied,
    CredentialInvalidated,
    CredentialMissing,
    GenerationFailed,

    // Server / network (ERROR)
    ServerError,
    NetworkError,
}

impl ErrorCode {
    /// Default status level for this code
    pub fn level(&self) -> StatusLevel {
        match self {
            ErrorCode::GenerationOk => StatusLevel::Info,
            ErrorCode::ValidationEmpty
            | ErrorCode::ValidationTextLimit
            | ErrorCode::MissingProductImage
            | ErrorCode::UnreadableFile
            | ErrorCode::UnsupportedMimeType => StatusLevel::Warning,
            _ => StatusLevel::Error,
        }
    }

    /// Default user-facing message
    pub fn to_message(&self) -> &'static str {
        match self {
            ErrorCode::GenerationOk => "Advertisement generated successfully.",
            ErrorCode::ValidationEmpty => "Please describe the advertisement scene.",
            ErrorCode::ValidationTextLimit => "The description is too long. Please shorten it.",
            ErrorCode::MissingProductImage => "Please upload a product image.",
            ErrorCode::UnreadableFile => "The selected file could not be read.",
            ErrorCode::UnsupportedMimeType => {
                "Unsupported image type. Please upload a PNG, JPEG, WebP or HEIC image."
            }
            ErrorCode::NoImageProduced => {
                "No image was generated. The model might have returned only text."
            }
            ErrorCode::PermissionDenied => "Permission denied.",
            ErrorCode::CredentialInvalidated => {
                "Session expired. Please select your API key again."
            }
            ErrorCode::CredentialMissing => "API Key not found. Please reconnect your account.",
            ErrorCode::GenerationFailed => "Failed to generate advertisement.",
            ErrorCode::ServerError => "The server is not responding. Please try again later.",
            ErrorCode::NetworkError => "Network error. Please check your connection.",
        }
    }
}

/// Processing result information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Status level (INFO/WARNING/ERROR)
    pub level: StatusLevel,

    /// Result code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,

    /// Optional additional context (e.g., max length)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ProcessResult {
    pub fn success(code: ErrorCode) -> Self {
        Self {
            level: StatusLevel::Info,
            code,
            message: code.to_message().to_string(),
            context: None,
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self {
            level: code.level(),
            code,
            message: code.to_message().to_string(),
            context: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_context(mut self, context: Option<serde_json::Value>) -> Self {
        self.context = context;
        self
    }
}

/// Encoded image as sent over the HTTP API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Base64 payload, bare or as a data URL
    pub data: String,

    /// MIME type (e.g., "image/png")
    pub mime_type: String,
}

impl ImagePayload {
    pub fn into_encoded(self) -> crate::intake::EncodedImage {
        crate::intake::EncodedImage::new(self.data, self.mime_type)
    }
}

impl From<&crate::intake::EncodedImage> for ImagePayload {
    fn from(image: &crate::intake::EncodedImage) -> Self {
        Self {
            data: image.data().to_string(),
            mime_type: image.mime_type().to_string(),
        }
    }
}

/// API Request: POST /api/v1/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Scene description
    pub description: String,

    #[serde(default)]
    pub aspect_ratio: AspectRatio,

    #[serde(default)]
    pub quality: QualityTier,

    /// Product image (required)
    #[serde(default)]
    pub product_image: Option<ImagePayload>,

    /// Brand logo (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<ImagePayload>,
}

impl GenerateRequest {
    /// Validate request
    pub fn validate(&self) -> Result<(), crate::validation::ValidationError> {
        let product = self
            .product_image
            .as_ref()
            .ok_or(crate::validation::ValidationError::MissingProductImage)?;
        crate::validation::validate_payload(product)?;
        if let Some(logo) = &self.logo_image {
            crate::validation::validate_payload(logo)?;
        }
        crate::validation::validate_description(&self.description)
    }

    pub fn brief(&self) -> GenerationBrief {
        GenerationBrief::new(self.description.clone(), self.aspect_ratio, self.quality)
    }
}

/// API Response: POST /api/v1/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Processing result information
    pub result: ProcessResult,

    /// Data URL of the generated image (only present on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl GenerateResponse {
    /// Create success response with image data
    pub fn success(image: GeneratedImage) -> Self {
        Self {
            result: ProcessResult::success(ErrorCode::GenerationOk),
            image_url: Some(image.data_url),
        }
    }

    /// Create error response without image data
    pub fn error(result: ProcessResult) -> Self {
        Self {
            result,
            image_url: None,
        }
    }
}
