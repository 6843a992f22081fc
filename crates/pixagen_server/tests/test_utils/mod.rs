//! Test helpers for exercising the router in-process.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use pixagen_core::{Credential, DataUri};
use pixagen_error::{GenerationError, GenerationErrorKind};
use pixagen_models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationProvider, Part,
};
use pixagen_server::{AppState, ServerConfig, ServerConfigBuilder, create_router};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Provider answering every call the same way and recording the keys used.
pub struct StubProvider {
    answer: Result<GenerateContentResponse, GenerationErrorKind>,
    keys: Mutex<Vec<String>>,
    models: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn answering(response: GenerateContentResponse) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(response),
            keys: Mutex::new(Vec::new()),
            models: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(kind: GenerationErrorKind) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(kind),
            keys: Mutex::new(Vec::new()),
            models: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.keys.lock().unwrap().len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for StubProvider {
    fn provider_name(&self) -> &'static str {
        "stub"
    }

    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        self.keys
            .lock()
            .unwrap()
            .push(credential.expose().to_string());
        self.models.lock().unwrap().push(model.to_string());
        self.answer.clone().map_err(GenerationError::new)
    }
}

pub fn parts_response(parts: Vec<Part>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(Content {
                parts: Some(parts),
                ..Content::default()
            }),
            ..Candidate::default()
        }]),
        ..GenerateContentResponse::default()
    }
}

pub fn media_response(mime: &str, bytes: &[u8]) -> GenerateContentResponse {
    parts_response(vec![Part::inline(&DataUri::new(mime, bytes.to_vec()))])
}

pub fn text_response(text: &str) -> GenerateContentResponse {
    parts_response(vec![Part::text(text)])
}

/// Config without any process-wide key.
pub fn keyless_config() -> ServerConfig {
    ServerConfig::default()
}

/// Config with a default Gemini key.
pub fn keyed_config() -> ServerConfig {
    ServerConfigBuilder::default()
        .gemini_api_key(Some("env-key".to_string()))
        .build()
        .expect("valid config")
}

pub fn router<P>(config: &ServerConfig, provider: Arc<P>) -> Router
where
    P: GenerationProvider + 'static,
{
    let state = AppState::new(config, provider);
    create_router(state, *config.body_limit_bytes())
}

/// Sends one request and returns the status with the parsed JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> Result<(StatusCode, Value), Box<dyn std::error::Error>> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}
