//! Results handed back to the HTTP layer.

use crate::DataUri;
use serde::Serialize;

/// Diagnostic note attached when a video response carries no video part.
pub const NO_VIDEO_NOTE: &str = "no video blob returned; inspect raw";

/// Outcome of one logical generation job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProviderResult {
    /// Extracted images in call order; may be empty
    Images {
        /// Data URIs of every image found
        images: Vec<DataUri>,
    },
    /// At least one extracted video; the first is the primary one
    Video {
        /// Data URIs of every video found
        videos: Vec<DataUri>,
    },
    /// Improved prompt text
    Text {
        /// Provider text, verbatim
        text: String,
    },
    /// Parsed vision-analysis document, or `{raw}` when the text was not JSON
    Insights {
        /// Parsed insights
        insights: serde_json::Value,
    },
    /// The provider answered but no usable media part was found
    NoMedia {
        /// Human-readable explanation
        note: String,
        /// Candidate list from the last response, for inspection
        raw: serde_json::Value,
    },
}
