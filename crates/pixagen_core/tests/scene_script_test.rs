//! Tests for the promo scene script builder.

use pixagen_core::{Normalizer, SceneScript};
use serde_json::json;

#[test]
fn test_scene_script_from_form_fields() {
    let script = Normalizer::default()
        .scene_script(&json!({
            "productName": "Ayam Gepuk",
            "brand": "Bangpit Foods",
            "ratio": "9:16",
            "duration": 15,
            "vibe": "fast-cut, upbeat",
            "cta": "Visit us 12pm-7pm",
            "shots": [
                { "start": 0, "duration": 3, "instruction": "Hero shot" },
                { "start": 3, "duration": 3, "instruction": "Macro close-up" }
            ],
            "overlays": [
                { "type": "text", "when": 0.5, "text": "Ayam Gepuk", "style": "bold" }
            ]
        }))
        .unwrap();

    assert_eq!(script.meta.version, 1);
    assert_eq!(script.meta.product_name.as_deref(), Some("Ayam Gepuk"));
    assert_eq!(script.meta.duration, Some(15));
    assert_eq!(script.shots.len(), 2);
    assert_eq!(script.shots[1].instruction, "Macro close-up");
    assert_eq!(script.overlays[0].when, 0.5);

    let value = script.to_value();
    assert_eq!(value["meta"]["productName"], "Ayam Gepuk");
    assert_eq!(value["overlays"][0]["type"], "text");
    assert_eq!(value["cta"], "Visit us 12pm-7pm");
}

#[test]
fn test_scene_script_defaults_to_empty_lists() {
    let script = Normalizer::default().scene_script(&json!({})).unwrap();
    assert!(script.shots.is_empty());
    assert!(script.overlays.is_empty());
    assert_eq!(script.meta.version, 1);

    let value = script.to_value();
    assert_eq!(value["shots"], json!([]));
    assert!(value["meta"].get("brand").is_none());
}

#[test]
fn test_scene_script_aliases() {
    let script = Normalizer::default()
        .scene_script(&json!({ "mood": "calm", "aspectRatio": "1:1", "durationSecs": "12" }))
        .unwrap();
    assert_eq!(script.meta.vibe.as_deref(), Some("calm"));
    assert_eq!(script.meta.ratio.as_deref(), Some("1:1"));
    assert_eq!(script.meta.duration, Some(12));
}

#[test]
fn test_overlay_time_alias_and_default_type() {
    let script = Normalizer::default()
        .scene_script(&json!({ "overlays": [{ "time": 11, "text": "CTA" }] }))
        .unwrap();
    assert_eq!(script.overlays[0].overlay_type, "text");
    assert_eq!(script.overlays[0].when, 11.0);
}

#[test]
fn test_malformed_shots_are_rejected() {
    let err = Normalizer::default()
        .scene_script(&json!({ "shots": "three quick cuts" }))
        .unwrap_err();
    assert!(err.to_string().contains("shots"));
}

#[test]
fn test_scene_script_round_trips_through_serde() {
    let original: SceneScript = serde_json::from_value(json!({
        "meta": { "version": 1, "brand": "B" },
        "shots": [{ "start": 1, "duration": 2, "instruction": "x" }]
    }))
    .unwrap();
    let again: SceneScript = serde_json::from_value(original.to_value()).unwrap();
    assert_eq!(original, again);
}
