// Provider error classification
//
// Structured signals (HTTP status, Google error `status`) are checked first.
// Substring matching on the message is the fallback for failures that carry
// no envelope, such as transport errors or proxies returning plain text.

use visioncraft_core::{GenerationError, QualityTier};

use crate::wire::ErrorEnvelope;

const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
const NOT_FOUND: &str = "NOT_FOUND";
const ENTITY_NOT_FOUND: &str = "Requested entity was not found";

/// Classify a non-success HTTP response
pub fn classify_http_error(status: u16, body: &str, tier: QualityTier) -> GenerationError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let error = envelope.error;
        let code = error.code.unwrap_or(status);
        return classify_status(code, error.status.as_deref(), tier)
            .unwrap_or_else(|| classify_message(error.message.as_deref().unwrap_or_default(), tier));
    }

    classify_status(status, None, tier).unwrap_or_else(|| classify_message(body, tier))
}

/// Map structured codes to the taxonomy; `None` when they say nothing specific
fn classify_status(code: u16, status: Option<&str>, tier: QualityTier) -> Option<GenerationError> {
    match (code, status) {
        (_, Some(PERMISSION_DENIED)) | (403, _) => Some(GenerationError::PermissionDenied { tier }),
        (_, Some(NOT_FOUND)) | (404, _) => Some(GenerationError::CredentialInvalidated),
        _ => None,
    }
}

/// Fallback heuristic over a free-text failure message
pub fn classify_message(message: &str, tier: QualityTier) -> GenerationError {
    if message.contains("403") || message.contains(PERMISSION_DENIED) {
        GenerationError::PermissionDenied { tier }
    } else if message.contains(ENTITY_NOT_FOUND) {
        GenerationError::CredentialInvalidated
    } else {
        GenerationError::failed(message)
    }
}
