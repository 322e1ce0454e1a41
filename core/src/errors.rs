// Error taxonomy for advertisement generation

use crate::models::{ErrorCode, ProcessResult, QualityTier, StatusLevel};

/// Message used when the provider gave no usable error text
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate advertisement.";

/// Classified failure of one generation attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("A product image is required.")]
    MissingProductImage,

    #[error("The selected file could not be read: {0}")]
    UnreadableFile(String),

    #[error("No image was generated. The model might have returned only text.")]
    NoImageProduced,

    #[error("Permission denied. {}", .tier.permission_hint())]
    PermissionDenied { tier: QualityTier },

    #[error("Session expired. Please select your API key again.")]
    CredentialInvalidated,

    #[error("API Key not found. Please reconnect your account.")]
    CredentialMissing,

    #[error("{0}")]
    GenerationFailed(String),
}

impl GenerationError {
    /// Provider failure carrying its raw message, or the generic one when blank
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            GenerationError::GenerationFailed(GENERIC_FAILURE_MESSAGE.to_string())
        } else {
            GenerationError::GenerationFailed(message)
        }
    }

    /// Whether the host must run its credential selection flow again
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            GenerationError::CredentialInvalidated | GenerationError::CredentialMissing
        )
    }

    /// Convert to ErrorCode
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            GenerationError::MissingProductImage => ErrorCode::MissingProductImage,
            GenerationError::UnreadableFile(_) => ErrorCode::UnreadableFile,
            GenerationError::NoImageProduced => ErrorCode::NoImageProduced,
            GenerationError::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            GenerationError::CredentialInvalidated => ErrorCode::CredentialInvalidated,
            GenerationError::CredentialMissing => ErrorCode::CredentialMissing,
            GenerationError::GenerationFailed(_) => ErrorCode::GenerationFailed,
        }
    }

    pub fn status_level(&self) -> StatusLevel {
        self.to_error_code().level()
    }

    /// Result body for API responses, carrying the full message
    pub fn to_process_result(&self) -> ProcessResult {
        ProcessResult::error(self.to_error_code()).with_message(self.to_string())
    }

    /// Rebuild from an API result. The tier is needed to restore the permission hint.
    pub fn from_process_result(result: &ProcessResult, tier: QualityTier) -> Self {
        match result.code {
            ErrorCode::MissingProductImage => GenerationError::MissingProductImage,
            ErrorCode::UnreadableFile | ErrorCode::UnsupportedMimeType => {
                GenerationError::UnreadableFile(result.message.clone())
            }
            ErrorCode::NoImageProduced => GenerationError::NoImageProduced,
            ErrorCode::PermissionDenied => GenerationError::PermissionDenied { tier },
            ErrorCode::CredentialInvalidated => GenerationError::CredentialInvalidated,
            ErrorCode::CredentialMissing => GenerationError::CredentialMissing,
            _ => GenerationError::failed(result.message.clone()),
        }
    }
}

/// Credential capability errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("no API key configured (checked: {0})")]
    NotConfigured(String),

    #[error("credential selection failed: {0}")]
    SelectionFailed(String),
}
