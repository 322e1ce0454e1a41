// API client errors

use visioncraft_core::{ErrorCode, GenerationError, ProcessResult, QualityTier};

/// API client error types
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Network communication error
    NetworkError(String),
    /// Server returned an error response
    ServerError(String),
    /// The server processed the request and reported a problem
    ProcessError(ProcessResult),
}

impl ApiError {
    /// Convert from ProcessResult
    pub fn from_process_result(result: ProcessResult) -> Self {
        ApiError::ProcessError(result)
    }

    /// Result code, when the server reported one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ApiError::ProcessError(result) => Some(result.code),
            _ => None,
        }
    }

    /// Map onto the generation error taxonomy so a frontend can drive its session state
    pub fn into_generation_error(self, tier: QualityTier) -> GenerationError {
        match self {
            ApiError::NetworkError(msg) | ApiError::ServerError(msg) => GenerationError::failed(msg),
            ApiError::ProcessError(result) => GenerationError::from_process_result(&result, tier),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::ServerError(msg) => write!(f, "Server error: {}", msg),
            ApiError::ProcessError(result) => write!(f, "{}", result.message),
        }
    }
}

impl std::error::Error for ApiError {}
