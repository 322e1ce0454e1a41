// API client library for VisionCraft
//
// This crate provides HTTP client functionality for frontends talking
// to the VisionCraft API server.

pub mod errors;
pub mod http_client;

// Re-export commonly used items
pub use errors::ApiError;
pub use http_client::{generate_advertisement, list_formats, FormatInfo};
