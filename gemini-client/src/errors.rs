// Client errors

/// Errors constructing or configuring the Gemini client.
/// Failures of a generation attempt are `GenerationError`s instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid value for {name}: {value}")]
    InvalidConfig { name: &'static str, value: String },
}
