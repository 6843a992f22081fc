//! Gemini `generateContent` REST integration.

mod client;
mod dto;

pub use client::{DEFAULT_BASE_URL, GeminiClient};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};
