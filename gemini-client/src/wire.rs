// Gemini generateContent wire types

use serde::{Deserialize, Serialize};
use visioncraft_core::{ComposedRequest, ContentSegment, ImageConfig};

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub image_config: ImageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One part: text or inline binary data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

impl From<&ContentSegment> for Part {
    fn from(segment: &ContentSegment) -> Self {
        match segment {
            ContentSegment::InlineImage { mime_type, data } => Part {
                text: None,
                inline_data: Some(Blob {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                }),
            },
            ContentSegment::Text(text) => Part {
                text: Some(text.clone()),
                inline_data: None,
            },
        }
    }
}

impl From<&ComposedRequest> for GenerateContentRequest {
    fn from(request: &ComposedRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: request.segments.iter().map(Part::from).collect(),
                role: None,
            }],
            generation_config: GenerationConfig {
                image_config: request.image_config.clone(),
            },
        }
    }
}

/// Response body of generateContent
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, in order
    pub fn first_candidate_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Payload of the first part carrying inline data
    pub fn first_inline_image(&self) -> Option<&Blob> {
        self.first_candidate_parts()
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

/// Google API error envelope: `{"error":{"code","message","status"}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<u16>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use visioncraft_core::{compose, AspectRatio, EncodedImage, GenerationBrief, QualityTier};

    #[test]
    fn test_request_body_shape() {
        let brief = GenerationBrief::new("beach", AspectRatio::Widescreen, QualityTier::Pro);
        let product = EncodedImage::new("data:image/png;base64,AAAA", "image/png");
        let body = GenerateContentRequest::from(&compose(&brief, &product, None));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value["contents"][0]["parts"][0],
            serde_json::json!({ "inlineData": { "mimeType": "image/png", "data": "AAAA" } })
        );
        assert_eq!(
            value["contents"][0]["parts"][1],
            serde_json::json!({ "text": "This is the product image." })
        );
        assert_eq!(
            value["generationConfig"],
            serde_json::json!({ "imageConfig": { "aspectRatio": "16:9", "imageSize": "1K" } })
        );
        assert!(value["contents"][0].get("role").is_none());
    }

    #[test]
    fn test_first_inline_image_skips_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "Here is your ad." },
                    { "inlineData": { "mimeType": "image/png", "data": "FIRST" } },
                    { "inlineData": { "mimeType": "image/png", "data": "SECOND" } }
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.first_inline_image().map(|b| b.data.as_str()), Some("FIRST"));
    }

    #[test]
    fn test_empty_response_has_no_parts() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_candidate_parts().is_empty());
        assert!(response.first_inline_image().is_none());
    }
}
