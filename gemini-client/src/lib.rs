// Gemini Client Library
//
// This crate provides the HTTP adapter between composed advertisement
// requests and the Gemini generateContent API.

mod classify;
mod client;
mod errors;
pub mod wire;

pub use classify::{classify_http_error, classify_message};
pub use client::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use errors::ClientError;
