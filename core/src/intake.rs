// Image intake: selected files to transportable encoded images

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::composer::strip_transport_prefix;
use crate::errors::GenerationError;

/// Opaque handle the presentation layer uses to display a preview.
/// Releasing the underlying resource is the presentation layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayHandle(pub uuid::Uuid);

impl DisplayHandle {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for DisplayHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory image ready to be sent to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data: String,
    mime_type: String,
    handle: DisplayHandle,
}

impl EncodedImage {
    /// Wrap already-encoded text, bare base64 or a full data URL
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
            handle: DisplayHandle::new(),
        }
    }

    /// Encode raw file bytes
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, GenerationError> {
        if bytes.is_empty() {
            return Err(GenerationError::UnreadableFile("file is empty".to_string()));
        }
        if mime_type.trim().is_empty() {
            return Err(GenerationError::UnreadableFile(
                "file type is unknown".to_string(),
            ));
        }

        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        tracing::debug!(bytes = bytes.len(), mime_type, "encoded selected file");
        Ok(Self::new(data, mime_type.trim()))
    }

    /// Parse a browser data URL (`data:<mime>;base64,<payload>`)
    pub fn from_data_url(url: &str) -> Result<Self, GenerationError> {
        let malformed = || GenerationError::UnreadableFile("malformed data URL".to_string());

        let (header, _) = url.split_once(',').ok_or_else(malformed)?;
        let mime_type = header
            .strip_prefix("data:")
            .and_then(|rest| rest.strip_suffix(";base64"))
            .filter(|mime| !mime.is_empty())
            .ok_or_else(malformed)?;

        Ok(Self::new(url, mime_type))
    }

    /// Encoded text exactly as received
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn handle(&self) -> DisplayHandle {
        self.handle
    }

    /// Base64 payload with any data URL header removed
    pub fn payload(&self) -> &str {
        strip_transport_prefix(&self.data)
    }

    /// Decode the payload to binary
    pub fn decode(&self) -> Result<Vec<u8>, GenerationError> {
        base64::engine::general_purpose::STANDARD
            .decode(self.payload())
            .map_err(|e| GenerationError::UnreadableFile(e.to_string()))
    }

    /// Validate MIME type and encoding
    pub fn validate(&self) -> Result<(), crate::validation::ValidationError> {
        crate::validation::validate_image(self)
    }
}

/// The product and logo images currently selected in the form.
/// Replacing or clearing a slot hands the previous image back so its
/// display handle can be released.
#[derive(Debug, Clone, Default)]
pub struct ImageSlots {
    product: Option<EncodedImage>,
    logo: Option<EncodedImage>,
}

impl ImageSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product(&self) -> Option<&EncodedImage> {
        self.product.as_ref()
    }

    pub fn logo(&self) -> Option<&EncodedImage> {
        self.logo.as_ref()
    }

    pub fn set_product(&mut self, image: EncodedImage) -> Option<EncodedImage> {
        self.product.replace(image)
    }

    pub fn set_logo(&mut self, image: EncodedImage) -> Option<EncodedImage> {
        self.logo.replace(image)
    }

    pub fn clear_product(&mut self) -> Option<EncodedImage> {
        self.product.take()
    }

    pub fn clear_logo(&mut self) -> Option<EncodedImage> {
        self.logo.take()
    }
}
