//! Test utilities for provider tests.
//!
//! [`MockProvider`] replays scripted responses and records every call.

#![allow(dead_code)]

use async_trait::async_trait;
use pixagen_core::{Credential, DataUri};
use pixagen_error::{GenerationError, GenerationErrorKind};
use pixagen_models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationProvider,
    InlineData, Part,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded provider call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub key: String,
    pub model: String,
    pub request: GenerateContentRequest,
}

/// Scripted provider; once the script runs out every call gets `fallback`.
pub struct MockProvider {
    script: Mutex<VecDeque<Result<GenerateContentResponse, GenerationErrorKind>>>,
    fallback: Result<GenerateContentResponse, GenerationErrorKind>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    /// Answers every call with `response`.
    pub fn always(response: GenerateContentResponse) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with `kind`.
    pub fn failing(kind: GenerationErrorKind) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(kind),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues an answer ahead of the fallback.
    pub fn then(self, answer: Result<GenerateContentResponse, GenerationErrorKind>) -> Self {
        self.script.lock().unwrap().push_back(answer);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            key: credential.expose().to_string(),
            model: model.to_string(),
            request: request.clone(),
        });
        let answer = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        answer.map_err(GenerationError::new)
    }
}

/// A response whose first candidate carries the given parts.
pub fn response_with_parts(parts: Vec<Part>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: Some(parts),
                ..Content::default()
            }),
            ..Candidate::default()
        }]),
        ..GenerateContentResponse::default()
    }
}

/// A response carrying one inline media part.
pub fn media_response(mime: &str, bytes: &[u8]) -> GenerateContentResponse {
    response_with_parts(vec![Part::inline(&DataUri::new(mime, bytes.to_vec()))])
}

/// A response carrying one text part.
pub fn text_response(text: &str) -> GenerateContentResponse {
    response_with_parts(vec![Part::text(text)])
}

/// An inline part with a MIME type but no payload.
pub fn empty_inline_part(mime: &str) -> Part {
    Part {
        inline_data: Some(InlineData {
            mime_type: Some(mime.to_string()),
            data: None,
        }),
        ..Part::default()
    }
}

pub fn provider_failure(message: &str) -> GenerationErrorKind {
    GenerationErrorKind::ProviderCallFailed {
        status: Some(500),
        message: message.to_string(),
    }
}

pub fn credential() -> Credential {
    Credential::new("test-key").expect("non-blank key")
}
