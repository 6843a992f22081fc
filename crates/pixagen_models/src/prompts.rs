//! Provider request bodies per job kind.

use crate::{GenerateContentRequest, GenerationConfig, Part};
use pixagen_core::{GenerationKind, GenerationRequest};

/// Instruction sent ahead of the user's prompt for enhancement jobs;
/// `{target}` is replaced with the enhancement target.
pub const ENHANCE_TEMPLATE: &str =
    "Improve this {target} prompt. Return only the improved prompt with no extra commentary.";

/// Instruction sent with the product photo for vision analysis.
pub const VISION_INSTRUCTION: &str = "You are a product analyst for short-form ads.
Return JSON with keys: category, brandGuess, dominantColors (array), angles (array),
materials (array), textOnLabel (string), adSuggestions (array of 3 quick ideas).";

/// Instruction for fusing the product (and optional person) into one image.
pub fn composite_prompt(with_person: bool, aspect_ratio: &str) -> String {
    let person = if with_person {
        " with the provided person model"
    } else {
        ""
    };
    format!(
        "Generate a commercial-ready composite for TikTok ads.\n\
         Blend the given product into a lifestyle scene{}.\n\
         Realistic lighting/shadow, shallow DOF, vibrant but natural. No text/watermark. Aspect ratio {}.",
        person, aspect_ratio
    )
}

fn image_config(request: &GenerationRequest) -> GenerationConfig {
    GenerationConfig {
        aspect_ratio: Some(request.aspect_ratio().clone()),
        output_mime_type: Some("image/png".to_string()),
        ..GenerationConfig::default()
    }
}

/// Builds the body for one provider call.
///
/// Batched kinds send the same body on every call; video asks for one clip
/// per call because the invoker repeats the call instead.
pub fn build_content_request(request: &GenerationRequest) -> GenerateContentRequest {
    let prompt = request.prompt_or_script().to_provider_text();

    match request.kind() {
        GenerationKind::Image => {
            GenerateContentRequest::user(vec![Part::text(prompt)], Some(image_config(request)))
        }
        GenerationKind::CompositeImage => {
            let mut parts = vec![Part::text(composite_prompt(
                request.secondary_image().is_some(),
                request.aspect_ratio(),
            ))];
            parts.extend(request.reference_images().iter().map(Part::inline));
            GenerateContentRequest::user(parts, Some(image_config(request)))
        }
        GenerationKind::Video => GenerateContentRequest::user(
            vec![Part::text(prompt)],
            Some(GenerationConfig {
                aspect_ratio: Some(request.aspect_ratio().clone()),
                duration_seconds: Some(*request.duration_seconds()),
                video_count: Some(1),
                allow_people: Some(*request.allow_people()),
                ..GenerationConfig::default()
            }),
        ),
        GenerationKind::EnhanceText => GenerateContentRequest::user(
            vec![
                Part::text(ENHANCE_TEMPLATE.replace("{target}", request.enhance_target())),
                Part::text(prompt),
            ],
            None,
        ),
        GenerationKind::VisionAnalyze => {
            let mut parts = vec![Part::text(VISION_INSTRUCTION)];
            parts.extend(request.primary_image().map(Part::inline));
            GenerateContentRequest::user(parts, None)
        }
    }
}
