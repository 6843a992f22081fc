//! Response extraction edge cases.

mod test_utils;

use pixagen_models::{
    GenerateContentResponse, MediaExtraction, MediaFilter, Part, extract_media, extract_text,
};
use serde_json::{Value, json};
use test_utils::{empty_inline_part, media_response, response_with_parts, text_response};

#[test]
fn test_absent_candidates_are_not_found() {
    let response = GenerateContentResponse::default();
    assert_eq!(
        extract_media(&response, MediaFilter::Any),
        MediaExtraction::NotFound { raw: Value::Null }
    );
    assert_eq!(extract_text(&response), "");
}

#[test]
fn test_empty_candidates_are_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let response: GenerateContentResponse = serde_json::from_value(json!({ "candidates": [] }))?;
    assert_eq!(
        extract_media(&response, MediaFilter::Video),
        MediaExtraction::NotFound { raw: json!([]) }
    );
    Ok(())
}

#[test]
fn test_candidate_without_content_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{ "finishReason": "SAFETY" }]
    }))?;
    match extract_media(&response, MediaFilter::Any) {
        MediaExtraction::NotFound { raw } => assert_eq!(raw[0]["finishReason"], "SAFETY"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_video_filter_returns_mp4_data_uri() {
    let response = media_response("video/mp4", b"\x00\x00\x00\x18ftypmp42");
    let media = extract_media(&response, MediaFilter::Video)
        .found()
        .expect("video part");
    assert_eq!(media.mime_type(), "video/mp4");
    assert!(media.to_string().starts_with("data:video/mp4;base64,"));
}

#[test]
fn test_video_filter_skips_images() {
    let response = response_with_parts(vec![
        Part::inline(&pixagen_core::DataUri::new("image/png", b"thumb".to_vec())),
        Part::inline(&pixagen_core::DataUri::new("video/webm", b"clip".to_vec())),
    ]);
    let media = extract_media(&response, MediaFilter::Video)
        .found()
        .expect("video part");
    assert_eq!(media.mime_type(), "video/webm");
    assert_eq!(media.bytes(), b"clip");

    let first = extract_media(&response, MediaFilter::Any)
        .found()
        .expect("any part");
    assert_eq!(first.mime_type(), "image/png");
}

#[test]
fn test_matching_part_without_payload_is_not_found() {
    let response = response_with_parts(vec![empty_inline_part("video/mp4")]);
    assert!(extract_media(&response, MediaFilter::Video).found().is_none());
}

#[test]
fn test_missing_mime_type_defaults_to_octet_stream() -> Result<(), Box<dyn std::error::Error>> {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "aGk=" } }] } }]
    }))?;
    let media = extract_media(&response, MediaFilter::Any)
        .found()
        .expect("inline part");
    assert_eq!(media.to_string(), "data:application/octet-stream;base64,aGk=");
    Ok(())
}

#[test]
fn test_undecodable_payload_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{ "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "%%%" } }] } }]
    }))?;
    assert!(extract_media(&response, MediaFilter::Any).found().is_none());
    Ok(())
}

#[test]
fn test_text_parts_are_concatenated() {
    let response = response_with_parts(vec![
        Part::text("{\"category\":"),
        empty_inline_part("image/png"),
        Part::text("\"shoe\"}"),
    ]);
    assert_eq!(extract_text(&response), "{\"category\":\"shoe\"}");
    assert_eq!(extract_text(&text_response("hello")), "hello");
}
