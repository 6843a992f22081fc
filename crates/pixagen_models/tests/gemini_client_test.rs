//! `GeminiClient` against a local stub of the generateContent endpoint.

mod test_utils;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use pixagen_error::GenerationErrorKind;
use pixagen_models::{
    GeminiClient, GenerateContentRequest, GenerationConfig, GenerationProvider, MediaFilter, Part,
    extract_media,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use test_utils::credential;

#[derive(Clone, Default)]
struct Seen {
    calls: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

async fn generate(
    State(seen): State<Seen>,
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.calls
        .lock()
        .unwrap()
        .push((target.clone(), key.clone(), body));

    if key.as_deref() != Some("test-key") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": { "code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT" }
            })),
        );
    }
    if target.starts_with("broken") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "code": 500, "message": "Internal error encountered." } })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "inlineData": { "mimeType": "image/png", "data": "cG5n" } }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 4 }
        })),
    )
}

async fn spawn_stub() -> Result<(String, Seen), Box<dyn std::error::Error>> {
    let seen = Seen::default();
    let app = Router::new()
        .route("/v1beta/models/:target", post(generate))
        .with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{}/v1beta", addr), seen))
}

fn image_request() -> GenerateContentRequest {
    GenerateContentRequest::user(
        vec![Part::text("red sneaker")],
        Some(GenerationConfig {
            aspect_ratio: Some("1:1".to_string()),
            output_mime_type: Some("image/png".to_string()),
            ..GenerationConfig::default()
        }),
    )
}

#[tokio::test]
async fn test_client_speaks_generate_content_wire_format() -> Result<(), Box<dyn std::error::Error>>
{
    let (base_url, seen) = spawn_stub().await?;
    let client = GeminiClient::new(base_url);

    let response = client
        .generate_content(&credential(), "imagen-3.0-generate-002", &image_request())
        .await?;

    let media = extract_media(&response, MediaFilter::Any)
        .found()
        .expect("image part");
    assert_eq!(media.to_string(), "data:image/png;base64,cG5n");
    assert!(response.other.contains_key("usageMetadata"));

    let calls = seen.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    let (target, key, body) = &calls[0];
    assert_eq!(target, "imagen-3.0-generate-002:generateContent");
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(
        body,
        &json!({
            "contents": [{ "role": "user", "parts": [{ "text": "red sneaker" }] }],
            "generationConfig": { "aspectRatio": "1:1", "outputMimeType": "image/png" }
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_client_passes_provider_message_through() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, _seen) = spawn_stub().await?;
    let client = GeminiClient::new(base_url);
    let wrong = pixagen_core::Credential::new("wrong-key").expect("non-blank key");

    let err = client
        .generate_content(&wrong, "gemini-2.5-flash", &image_request())
        .await
        .unwrap_err();

    assert_eq!(
        err.kind(),
        &GenerationErrorKind::ProviderCallFailed {
            status: Some(400),
            message: "API key not valid. Please pass a valid API key.".to_string(),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_client_reports_server_errors() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, _seen) = spawn_stub().await?;
    let client = GeminiClient::new(format!("{}/", base_url));

    let err = client
        .generate_content(&credential(), "broken-model", &image_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind().to_string(), "Internal error encountered.");
    assert!(!err.kind().is_client_error());
    Ok(())
}

#[tokio::test]
async fn test_client_reports_unreachable_provider() -> Result<(), Box<dyn std::error::Error>> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    let client = GeminiClient::new(format!("http://{}/v1beta", addr));

    let err = client
        .generate_content(&credential(), "veo-3.0", &image_request())
        .await
        .unwrap_err();

    match err.kind() {
        GenerationErrorKind::ProviderCallFailed { status, .. } => assert_eq!(*status, None),
        other => panic!("expected ProviderCallFailed, got {:?}", other),
    }
    Ok(())
}
