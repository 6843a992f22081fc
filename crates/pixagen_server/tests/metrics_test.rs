//! Metered provider passthrough.
//!
//! Run with: cargo test --package pixagen_server --features metrics

#![cfg(feature = "metrics")]

mod test_utils;

use pixagen_core::Credential;
use pixagen_error::GenerationErrorKind;
use pixagen_models::{GenerateContentRequest, GenerationProvider, Part};
use pixagen_server::{MeteredProvider, ProviderMetrics};
use test_utils::{StubProvider, text_response};

#[tokio::test]
async fn test_metered_provider_passes_results_through() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubProvider::answering(text_response("hello"));
    let metered = MeteredProvider::with_metrics(stub.clone(), ProviderMetrics::new());
    let key = Credential::new("k").expect("non-blank key");
    let request = GenerateContentRequest::user(vec![Part::text("hi")], None);

    let response = metered
        .generate_content(&key, "gemini-2.5-flash", &request)
        .await?;

    assert_eq!(pixagen_models::extract_text(&response), "hello");
    assert_eq!(stub.call_count(), 1);
    assert_eq!(metered.provider_name(), "stub");
    Ok(())
}

#[tokio::test]
async fn test_metered_provider_passes_failures_through() {
    let stub = StubProvider::failing(GenerationErrorKind::ProviderCallFailed {
        status: Some(503),
        message: "unavailable".to_string(),
    });
    let metered = MeteredProvider::new(stub);
    let key = Credential::new("k").expect("non-blank key");
    let request = GenerateContentRequest::user(vec![Part::text("hi")], None);

    let err = metered
        .generate_content(&key, "gemini-2.5-flash", &request)
        .await
        .unwrap_err();
    assert_eq!(err.kind().to_string(), "unavailable");
}

#[test]
fn test_init_metrics_installs_provider() {
    let provider = pixagen_server::init_metrics("pixagen_test", 60);
    ProviderMetrics::new().record("veo-3.0", 0.5, None);
    let _ = provider.shutdown();
}
