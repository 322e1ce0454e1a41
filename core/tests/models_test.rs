// Unit tests for models module

use visioncraft_core::*;

// ==================== AspectRatio Tests ====================

#[test]
fn test_aspect_ratio_tokens() {
    let tokens: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
    assert_eq!(tokens, vec!["1:1", "3:4", "4:3", "9:16", "16:9"]);
}

#[test]
fn test_aspect_ratio_parse() {
    assert_eq!("9:16".parse::<AspectRatio>().unwrap(), AspectRatio::Story);
    assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Widescreen);
    assert!("2:1".parse::<AspectRatio>().is_err());
}

#[test]
fn test_aspect_ratio_serde_uses_token() {
    let json = serde_json::to_string(&AspectRatio::Portrait).unwrap();
    assert_eq!(json, "\"3:4\"");

    let parsed: AspectRatio = serde_json::from_str("\"4:3\"").unwrap();
    assert_eq!(parsed, AspectRatio::Landscape);

    assert!(serde_json::from_str::<AspectRatio>("\"5:4\"").is_err());
}

#[test]
fn test_aspect_ratio_default_is_square() {
    assert_eq!(AspectRatio::default(), AspectRatio::Square);
}

// ==================== QualityTier Tests ====================

#[test]
fn test_quality_tier_models() {
    assert_eq!(QualityTier::Standard.model_id(), "gemini-2.5-flash-image");
    assert_eq!(QualityTier::Pro.model_id(), "gemini-3-pro-image-preview");
    assert_ne!(QualityTier::Standard.model_id(), QualityTier::Pro.model_id());
}

#[test]
fn test_quality_tier_from_flag() {
    assert_eq!(QualityTier::from_pro_flag(true), QualityTier::Pro);
    assert_eq!(QualityTier::from_pro_flag(false), QualityTier::Standard);
    assert_eq!(QualityTier::default(), QualityTier::Standard);
}

// ==================== FormatPreset Tests ====================

#[test]
fn test_format_presets() {
    assert_eq!(FormatPreset::default_preset().id, "insta-post");
    assert_eq!(
        FormatPreset::find("insta-reel").map(|p| p.aspect_ratio),
        Some(AspectRatio::Story)
    );
    assert_eq!(
        FormatPreset::find("fb-post").map(|p| p.label),
        Some("Facebook Post")
    );
    assert!(FormatPreset::find("tiktok").is_none());
}

// ==================== GeneratedImage Tests ====================

#[test]
fn test_generated_image_data_url() {
    let image = GeneratedImage::from_png_base64("iVBORw0KGgo=");

    assert_eq!(image.data_url, "data:image/png;base64,iVBORw0KGgo=");
    assert_eq!(image.payload(), "iVBORw0KGgo=");
    assert!(image.generated_at > 0);
}

#[test]
fn test_generated_image_download_bytes() {
    let image = GeneratedImage::from_png_base64("iVBORw0KGgo=");

    assert_eq!(
        image.to_png_bytes().unwrap(),
        vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    );
    assert_eq!(GeneratedImage::DOWNLOAD_FILE_NAME, "vision-craft-output.png");
}

#[test]
fn test_generated_image_with_corrupt_payload() {
    let image = GeneratedImage::from_png_base64("%%%");
    assert!(matches!(
        image.to_png_bytes(),
        Err(GenerationError::UnreadableFile(_))
    ));
}

// ==================== ProcessResult Tests ====================

#[test]
fn test_process_result_levels() {
    assert_eq!(
        ProcessResult::success(ErrorCode::GenerationOk).level,
        StatusLevel::Info
    );
    assert_eq!(
        ProcessResult::error(ErrorCode::ValidationEmpty).level,
        StatusLevel::Warning
    );
    assert_eq!(
        ProcessResult::error(ErrorCode::NoImageProduced).level,
        StatusLevel::Error
    );
}

#[test]
fn test_process_result_serialization() {
    let result = ProcessResult::error(ErrorCode::CredentialInvalidated);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["level"], "ERROR");
    assert_eq!(json["code"], "CredentialInvalidated");
    assert_eq!(
        json["message"],
        "Session expired. Please select your API key again."
    );
    assert!(json.get("context").is_none());
}

// ==================== GenerateRequest Tests ====================

fn png_payload() -> ImagePayload {
    ImagePayload {
        data: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        mime_type: "image/png".to_string(),
    }
}

#[test]
fn test_generate_request_defaults() {
    let request: GenerateRequest = serde_json::from_value(serde_json::json!({
        "description": "studio shot",
        "product_image": { "data": "iVBORw0KGgo=", "mime_type": "image/png" }
    }))
    .unwrap();

    assert_eq!(request.aspect_ratio, AspectRatio::Square);
    assert_eq!(request.quality, QualityTier::Standard);
    assert!(request.logo_image.is_none());
    assert!(request.validate().is_ok());
}

#[test]
fn test_generate_request_without_product() {
    let request = GenerateRequest {
        description: "studio shot".to_string(),
        aspect_ratio: AspectRatio::Square,
        quality: QualityTier::Pro,
        product_image: None,
        logo_image: None,
    };

    let err = request.validate().unwrap_err();
    assert_eq!(err.to_error_code(), ErrorCode::MissingProductImage);
}

#[test]
fn test_generate_request_with_bad_logo() {
    let request = GenerateRequest {
        description: "studio shot".to_string(),
        aspect_ratio: AspectRatio::Square,
        quality: QualityTier::Standard,
        product_image: Some(png_payload()),
        logo_image: Some(ImagePayload {
            data: "iVBORw0KGgo=".to_string(),
            mime_type: "application/pdf".to_string(),
        }),
    };

    assert!(matches!(
        request.validate(),
        Err(ValidationError::UnsupportedMimeType(_))
    ));
}

#[test]
fn test_generate_request_blank_description() {
    let request = GenerateRequest {
        description: "   ".to_string(),
        aspect_ratio: AspectRatio::Square,
        quality: QualityTier::Standard,
        product_image: Some(png_payload()),
        logo_image: None,
    };

    assert!(matches!(
        request.validate(),
        Err(ValidationError::EmptyDescription)
    ));
}

#[test]
fn test_generate_response_success() {
    let response = GenerateResponse::success(GeneratedImage::from_png_base64("AAAA"));

    assert_eq!(response.result.code, ErrorCode::GenerationOk);
    assert_eq!(
        response.image_url.as_deref(),
        Some("data:image/png;base64,AAAA")
    );
}

#[test]
fn test_image_payload_from_encoded_keeps_original_text() {
    let image = EncodedImage::new("data:image/webp;base64,UklGRg==", "image/webp");
    let payload = ImagePayload::from(&image);

    assert_eq!(payload.data, "data:image/webp;base64,UklGRg==");
    assert_eq!(payload.mime_type, "image/webp");
    assert_eq!(payload.into_encoded().payload(), "UklGRg==");
}

#[test]
fn test_brief_validate() {
    let brief = GenerationBrief::new("sunset rooftop", AspectRatio::Story, QualityTier::Pro);
    assert!(brief.validate().is_ok());

    let blank = GenerationBrief::new(" \t", AspectRatio::Story, QualityTier::Pro);
    assert!(matches!(blank.validate(), Err(ValidationError::EmptyDescription)));
}

#[test]
fn test_encoded_image_validate() {
    let image = EncodedImage::new("data:image/webp;base64,UklGRg==", "image/webp");
    assert!(image.validate().is_ok());

    let unreadable = EncodedImage::new("data:image/webp;base64,@@@", "image/webp");
    assert!(matches!(unreadable.validate(), Err(ValidationError::InvalidEncoding)));
}
