//! Google AI Studio (Gemini, Imagen, Veo) integration.
//!
//! The pieces, in call order:
//! - [`build_content_request`] turns a canonical request into the provider body
//! - [`GenerationProvider`] sends it ([`GeminiClient`] over HTTP)
//! - [`extract_media`] / [`extract_text`] dig the payload out of the response
//! - [`Invoker`] runs the whole job, repeating calls for batched kinds

mod extract;
mod gemini;
mod insights;
mod invoker;
mod prompts;
mod provider;

pub use extract::{MediaExtraction, MediaFilter, extract_media, extract_text};
pub use gemini::{
    Candidate, Content, DEFAULT_BASE_URL, GeminiClient, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, InlineData, Part,
};
pub use insights::parse_insights;
pub use invoker::{BatchPolicy, Invoker};
pub use prompts::{ENHANCE_TEMPLATE, VISION_INSTRUCTION, build_content_request, composite_prompt};
pub use provider::GenerationProvider;
