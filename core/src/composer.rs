// Request composer: brief + images to an ordered provider request

use serde::{Deserialize, Serialize};

use crate::intake::EncodedImage;
use crate::models::{GenerationBrief, QualityTier};

/// Label following the product image
pub const PRODUCT_IMAGE_LABEL: &str = "This is the product image.";

/// Label following the logo image
pub const LOGO_IMAGE_LABEL: &str = "This is the brand logo.";

/// Image size hint sent with the pro tier only
pub const PRO_IMAGE_SIZE: &str = "1K";

/// One content part of the provider request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentSegment {
    /// Inline image, payload without data URL header
    InlineImage { mime_type: String, data: String },
    Text(String),
}

impl ContentSegment {
    fn image(image: &EncodedImage) -> Self {
        ContentSegment::InlineImage {
            mime_type: image.mime_type().to_string(),
            data: strip_transport_prefix(image.data()).to_string(),
        }
    }

    fn text(text: impl Into<String>) -> Self {
        ContentSegment::Text(text.into())
    }
}

/// Image generation options.
/// `image_size` is omitted entirely when unset; the standard model rejects the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
}

/// Provider request built right before dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedRequest {
    /// Provider model identifier
    pub model: String,

    /// Ordered content segments
    pub segments: Vec<ContentSegment>,

    pub image_config: ImageConfig,

    /// Tier the request was built for
    pub quality: QualityTier,
}

/// Remove a `data:<mime>;base64,` style header if present.
/// Returns everything after the first comma, or the input unchanged.
pub fn strip_transport_prefix(text: &str) -> &str {
    match text.split_once(',') {
        Some((_, payload)) => payload,
        None => text,
    }
}

/// Build the instruction text for a brief
pub fn build_instruction(description: &str, has_logo: bool) -> String {
    let mut inputs = vec!["1. A Product Image (primary focus).".to_string()];
    if has_logo {
        inputs.push("2. A Brand Logo (MUST be applied to the product).".to_string());
    }
    inputs.push(format!("3. Design Brief: \"{}\"", description));

    let mut directives = vec![
        "- The product should be the star of the show, integrated naturally into a generated background that matches the brief.",
        "- Lighting and composition must be photorealistic and cinematic.",
    ];
    if has_logo {
        directives.push(
            "- CRITICAL: The provided Brand Logo must be DIGITALLY COMPOSITED DIRECTLY ONTO THE PRODUCT SURFACE. \
             It must look like it is physically printed, embossed, or labeled on the product itself. \
             Respect the product's 3D geometry, curvature, and lighting. \
             Do NOT place the logo as a floating watermark in the corner.",
        );
    }
    directives.push(
        "- Do not generate text overlays unless specifically asked in the brief, as AI text can be imperfect. Focus on visual impact.",
    );
    directives.push("- Style: Professional, Clean, High Resolution.");

    format!(
        "You are a world-class advertising creative director.\n\n\
         Task: Create a high-end, aesthetic advertisement image based on the user's description.\n\n\
         Inputs Provided:\n{}\n\n\
         Directives:\n{}\n",
        inputs.join("\n"),
        directives.join("\n"),
    )
}

/// Image configuration for a tier
pub fn image_config(brief: &GenerationBrief) -> ImageConfig {
    ImageConfig {
        aspect_ratio: brief.aspect_ratio.as_str().to_string(),
        image_size: brief.quality.is_pro().then(|| PRO_IMAGE_SIZE.to_string()),
    }
}

/// Compose the provider request.
///
/// The caller guarantees a product image; a missing one is reported as
/// `MissingProductImage` before this is reached.
///
/// Segment order is `[product, product label, (logo, logo label), instruction]`.
/// The model reads each trailing text as describing the image before it.
pub fn compose(
    brief: &GenerationBrief,
    product: &EncodedImage,
    logo: Option<&EncodedImage>,
) -> ComposedRequest {
    let mut segments = vec![
        ContentSegment::image(product),
        ContentSegment::text(PRODUCT_IMAGE_LABEL),
    ];

    if let Some(logo) = logo {
        segments.push(ContentSegment::image(logo));
        segments.push(ContentSegment::text(LOGO_IMAGE_LABEL));
    }

    segments.push(ContentSegment::text(build_instruction(
        &brief.description,
        logo.is_some(),
    )));

    ComposedRequest {
        model: brief.quality.model_id().to_string(),
        segments,
        image_config: image_config(brief),
        quality: brief.quality,
    }
}
