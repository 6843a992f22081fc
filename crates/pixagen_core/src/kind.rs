//! Generation job kinds and their per-kind limits.

use serde::{Deserialize, Serialize};

/// The kind of job a [`crate::GenerationRequest`] describes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum GenerationKind {
    /// Text-to-image generation
    Image,
    /// Scene-script-to-video generation
    Video,
    /// Prompt improvement
    EnhanceText,
    /// Product photo analysis returning JSON insights
    VisionAnalyze,
    /// Product (and optional person) fused into a lifestyle composite
    CompositeImage,
}

impl GenerationKind {
    /// Upper bound for `output_count`; also the provider call budget per request.
    pub fn max_output_count(self) -> u32 {
        match self {
            GenerationKind::Image => 4,
            GenerationKind::CompositeImage => 5,
            GenerationKind::Video => 2,
            GenerationKind::EnhanceText | GenerationKind::VisionAnalyze => 1,
        }
    }

    /// Number of provider calls when the request does not say.
    pub fn default_output_count(self) -> u32 {
        match self {
            GenerationKind::CompositeImage => 5,
            _ => 1,
        }
    }

    /// Provider model used when the request does not name one.
    pub fn default_model(self) -> &'static str {
        match self {
            GenerationKind::Image | GenerationKind::CompositeImage => "imagen-3.0-generate-002",
            GenerationKind::Video => "veo-3.0",
            GenerationKind::EnhanceText | GenerationKind::VisionAnalyze => "gemini-2.5-flash",
        }
    }

    /// Aspect ratio used when the request does not name one.
    pub fn default_aspect_ratio(self) -> &'static str {
        match self {
            GenerationKind::Video | GenerationKind::CompositeImage => "9:16",
            _ => "1:1",
        }
    }

    /// Whether the kind produces media through repeated provider calls.
    pub fn is_batched(self) -> bool {
        matches!(
            self,
            GenerationKind::Image | GenerationKind::Video | GenerationKind::CompositeImage
        )
    }

    /// Whether the job cannot run without a primary reference image.
    pub fn requires_reference_image(self) -> bool {
        matches!(
            self,
            GenerationKind::VisionAnalyze | GenerationKind::CompositeImage
        )
    }
}
