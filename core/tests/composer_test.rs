// Request composer tests

use visioncraft_core::*;

fn product() -> EncodedImage {
    EncodedImage::new("data:image/png;base64,iVBORw0KGgo=", "image/png")
}

fn logo() -> EncodedImage {
    EncodedImage::new("R0lGODlh", "image/webp")
}

fn brief(quality: QualityTier) -> GenerationBrief {
    GenerationBrief::new("golden hour beach shot", AspectRatio::Square, quality)
}

fn texts(request: &ComposedRequest) -> Vec<&str> {
    request
        .segments
        .iter()
        .filter_map(|segment| match segment {
            ContentSegment::Text(text) => Some(text.as_str()),
            ContentSegment::InlineImage { .. } => None,
        })
        .collect()
}

#[test]
fn test_standard_scenario_without_logo() {
    let request = compose(&brief(QualityTier::Standard), &product(), None);

    assert_eq!(request.model, STANDARD_MODEL);
    assert_eq!(request.segments.len(), 3);
    assert_eq!(
        serde_json::to_value(&request.image_config).unwrap(),
        serde_json::json!({ "aspectRatio": "1:1" })
    );
    assert_eq!(request.quality, QualityTier::Standard);
}

#[test]
fn test_pro_scenario_without_logo() {
    let request = compose(&brief(QualityTier::Pro), &product(), None);

    assert_eq!(request.model, PRO_MODEL);
    assert_eq!(
        serde_json::to_value(&request.image_config).unwrap(),
        serde_json::json!({ "aspectRatio": "1:1", "imageSize": "1K" })
    );
}

#[test]
fn test_segment_order_without_logo() {
    let request = compose(&brief(QualityTier::Standard), &product(), None);

    assert_eq!(
        request.segments[0],
        ContentSegment::InlineImage {
            mime_type: "image/png".to_string(),
            data: "iVBORw0KGgo=".to_string(),
        }
    );
    assert_eq!(
        request.segments[1],
        ContentSegment::Text(PRODUCT_IMAGE_LABEL.to_string())
    );
    assert_eq!(
        request.segments[2],
        ContentSegment::Text(build_instruction("golden hour beach shot", false))
    );
}

#[test]
fn test_segment_order_with_logo() {
    let logo = logo();
    let request = compose(&brief(QualityTier::Standard), &product(), Some(&logo));

    assert_eq!(request.segments.len(), 5);
    assert!(matches!(
        &request.segments[0],
        ContentSegment::InlineImage { mime_type, .. } if mime_type == "image/png"
    ));
    assert_eq!(
        request.segments[2],
        ContentSegment::InlineImage {
            mime_type: "image/webp".to_string(),
            data: "R0lGODlh".to_string(),
        }
    );
    assert_eq!(
        texts(&request),
        vec![
            PRODUCT_IMAGE_LABEL,
            LOGO_IMAGE_LABEL,
            build_instruction("golden hour beach shot", true).as_str(),
        ]
    );
}

#[test]
fn test_logo_directive_only_with_logo() {
    let logo = logo();
    let with_logo = compose(&brief(QualityTier::Pro), &product(), Some(&logo));
    let without_logo = compose(&brief(QualityTier::Pro), &product(), None);

    assert!(texts(&with_logo).last().unwrap().contains("floating watermark"));
    assert!(!texts(&without_logo).last().unwrap().contains("floating watermark"));
}

#[test]
fn test_standard_config_never_has_size_hint() {
    for ratio in AspectRatio::ALL {
        let brief = GenerationBrief::new("x", ratio, QualityTier::Standard);
        let value = serde_json::to_value(compose(&brief, &product(), None).image_config).unwrap();

        assert!(value.get("imageSize").is_none());
        assert_eq!(value["aspectRatio"], ratio.as_str());
    }
}

#[test]
fn test_pro_config_always_has_1k_hint() {
    for ratio in AspectRatio::ALL {
        let brief = GenerationBrief::new("x", ratio, QualityTier::Pro);
        let request = compose(&brief, &product(), None);

        assert_eq!(request.image_config.image_size.as_deref(), Some("1K"));
    }
}

#[test]
fn test_bare_payload_is_sent_unchanged() {
    let bare = EncodedImage::new("iVBORw0KGgo=", "image/png");
    let request = compose(&brief(QualityTier::Standard), &bare, None);

    assert!(matches!(
        &request.segments[0],
        ContentSegment::InlineImage { data, .. } if data == "iVBORw0KGgo="
    ));
}
