//! Promo scene scripts handed to the video model.

use serde::{Deserialize, Serialize};

/// A timed shot list plus text overlays describing a short promo video.
///
/// The video invoker never looks inside; it serializes the whole document as
/// the prompt text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SceneScript {
    /// Brand and format information
    pub meta: SceneMeta,
    /// Call to action shown at the end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    /// Shots in playback order
    #[serde(default)]
    pub shots: Vec<Shot>,
    /// Text overlays in playback order
    #[serde(default)]
    pub overlays: Vec<Overlay>,
}

impl SceneScript {
    /// Serializes the script into the JSON document sent to the provider.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Script header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMeta {
    /// Document format version
    pub version: u32,
    /// Brand name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Product being promoted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Aspect ratio token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    /// Total length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Mood descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
}

impl Default for SceneMeta {
    fn default() -> Self {
        Self {
            version: 1,
            brand: None,
            product_name: None,
            ratio: None,
            duration: None,
            vibe: None,
        }
    }
}

/// One timed shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    /// Offset from the start of the video, in seconds
    #[serde(default)]
    pub start: f64,
    /// Shot length in seconds
    #[serde(default)]
    pub duration: f64,
    /// Free-text direction for the model
    #[serde(default)]
    pub instruction: String,
}

/// A text overlay shown at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Overlay type, `text` unless stated otherwise
    #[serde(rename = "type", default = "default_overlay_type")]
    pub overlay_type: String,
    /// Offset in seconds
    #[serde(default, alias = "time", alias = "at")]
    pub when: f64,
    /// Overlay text
    #[serde(default)]
    pub text: String,
    /// Free-text styling hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

fn default_overlay_type() -> String {
    "text".to_string()
}
