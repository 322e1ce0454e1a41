// Validation logic for generation inputs

use crate::intake::EncodedImage;
use crate::models::{ErrorCode, ImagePayload, StatusLevel};

/// Maximum description length in characters
pub const MAX_DESCRIPTION_CHARS: usize = 4_000;

/// Image MIME types accepted by the provider
pub const SUPPORTED_MIME_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("description is empty")]
    EmptyDescription,

    #[error("description is too long: {0} characters (limit: {1})")]
    DescriptionTooLarge(usize, usize),

    #[error("product image is missing")]
    MissingProductImage,

    #[error("image MIME type is empty")]
    EmptyMimeType,

    #[error("unsupported image type: {0}")]
    UnsupportedMimeType(String),

    #[error("image data is not valid base64")]
    InvalidEncoding,
}

impl ValidationError {
    /// Convert to ErrorCode
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyDescription => ErrorCode::ValidationEmpty,
            ValidationError::DescriptionTooLarge(_, _) => ErrorCode::ValidationTextLimit,
            ValidationError::MissingProductImage => ErrorCode::MissingProductImage,
            ValidationError::UnsupportedMimeType(_) => ErrorCode::UnsupportedMimeType,
            ValidationError::EmptyMimeType | ValidationError::InvalidEncoding => {
                ErrorCode::UnreadableFile
            }
        }
    }

    /// Get status level for this validation error
    pub fn status_level(&self) -> StatusLevel {
        StatusLevel::Warning
    }

    /// Get context for error (e.g., max length)
    pub fn context(&self) -> Option<serde_json::Value> {
        match self {
            ValidationError::DescriptionTooLarge(actual, max) => Some(serde_json::json!({
                "actual": actual,
                "maxLength": max
            })),
            ValidationError::UnsupportedMimeType(mime_type) => Some(serde_json::json!({
                "mimeType": mime_type,
                "supported": SUPPORTED_MIME_TYPES,
            })),
            _ => None,
        }
    }

    pub fn to_process_result(&self) -> crate::models::ProcessResult {
        crate::models::ProcessResult::error(self.to_error_code()).with_context(self.context())
    }
}

/// Validate the scene description
///
/// # Rules
/// - Must contain something other than whitespace
/// - Must be within 4,000 characters
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    let chars = description.chars().count();
    if chars > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLarge(
            chars,
            MAX_DESCRIPTION_CHARS,
        ));
    }

    Ok(())
}

/// Validate an encoded image: known MIME type and decodable payload
pub fn validate_image(image: &EncodedImage) -> Result<(), ValidationError> {
    validate_mime_type(image.mime_type())?;
    image
        .decode()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidEncoding)
}

/// Validate an image received over the HTTP API
pub fn validate_payload(payload: &ImagePayload) -> Result<(), ValidationError> {
    validate_image(&EncodedImage::new(
        payload.data.clone(),
        payload.mime_type.clone(),
    ))
}

fn validate_mime_type(mime_type: &str) -> Result<(), ValidationError> {
    if mime_type.trim().is_empty() {
        return Err(ValidationError::EmptyMimeType);
    }
    let normalized = mime_type.trim().to_ascii_lowercase();
    if !SUPPORTED_MIME_TYPES.contains(&normalized.as_str()) {
        return Err(ValidationError::UnsupportedMimeType(mime_type.to_string()));
    }
    Ok(())
}
