use pixagen_core::{GenerationKind, Normalizer};
use pixagen_models::{VISION_INSTRUCTION, build_content_request, composite_prompt};
use serde_json::json;

#[test]
fn test_composite_prompt_mentions_person_only_when_present() {
    let solo = composite_prompt(false, "1:1");
    let duo = composite_prompt(true, "9:16");
    assert!(!solo.contains("person model"));
    assert!(solo.contains("Aspect ratio 1:1"));
    assert!(duo.contains("person model"));
    assert!(duo.contains("Aspect ratio 9:16"));
}

#[test]
fn test_video_body_carries_serialized_script() -> Result<(), Box<dyn std::error::Error>> {
    let request = Normalizer::default().normalize(
        GenerationKind::Video,
        &json!({ "script": { "meta": { "brand": "Acme" } }, "ratio": "16:9", "length": 5 }),
        None,
    )?;
    let body = serde_json::to_value(build_content_request(&request))?;

    let text = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    let script: serde_json::Value = serde_json::from_str(text)?;
    assert_eq!(script, json!({ "meta": { "brand": "Acme" } }));
    assert_eq!(
        body["generationConfig"],
        json!({ "aspectRatio": "16:9", "durationSeconds": 5, "videoCount": 1, "allowPeople": false })
    );
    Ok(())
}

#[test]
fn test_vision_body_is_instruction_then_image() -> Result<(), Box<dyn std::error::Error>> {
    let request = Normalizer::default().normalize(
        GenerationKind::VisionAnalyze,
        &json!({ "imageDataURL": "data:image/webp;base64,UklGRg==" }),
        None,
    )?;
    let body = serde_json::to_value(build_content_request(&request))?;

    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], VISION_INSTRUCTION);
    assert_eq!(
        parts[1]["inlineData"],
        json!({ "mimeType": "image/webp", "data": "UklGRg==" })
    );
    assert!(body.get("generationConfig").is_none());
    Ok(())
}
