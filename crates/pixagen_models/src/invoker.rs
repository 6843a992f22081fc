//! Runs one generation job against a provider.

use crate::{
    GenerateContentRequest, GenerationProvider, MediaExtraction, MediaFilter,
    build_content_request, extract_media, extract_text, parse_insights,
};
use pixagen_core::{
    Credential, DataUri, GenerationKind, GenerationRequest, NO_VIDEO_NOTE, ProviderResult,
};
use pixagen_error::{GenerationError, GenerationErrorKind, PixagenResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// What happens to a batch when one of its calls fails.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
pub enum BatchPolicy {
    /// The first failure fails the whole request; earlier results are dropped
    #[default]
    #[serde(alias = "abort")]
    #[strum(to_string = "abort", serialize = "abortOnFailure", ascii_case_insensitive)]
    AbortOnFailure,
    /// Keep calling; fail only when every call failed
    #[serde(alias = "partial")]
    #[strum(to_string = "partial", serialize = "collectPartial", ascii_case_insensitive)]
    CollectPartial,
}

/// Media gathered over a batch of calls.
struct BatchOutcome {
    media: Vec<DataUri>,
    last_raw: Value,
}

/// Executes canonical requests as 1..N sequential provider calls.
#[derive(Debug, Clone)]
pub struct Invoker<P> {
    provider: P,
    policy: BatchPolicy,
}

impl<P> Invoker<P>
where
    P: GenerationProvider,
{
    /// Creates an invoker with the default [`BatchPolicy::AbortOnFailure`] policy.
    pub fn new(provider: P) -> Self {
        Self::with_policy(provider, BatchPolicy::default())
    }

    /// Creates an invoker with an explicit batch policy.
    pub fn with_policy(provider: P, policy: BatchPolicy) -> Self {
        Self { provider, policy }
    }

    /// The batch policy in effect.
    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs `request`.
    ///
    /// Fails before any network call when the credential is missing, or when
    /// a vision/composite job has no primary image. Batched kinds make exactly
    /// `output_count` calls in sequence; text kinds make one.
    #[instrument(
        skip(self, request),
        fields(
            kind = %request.kind(),
            model = %request.model_identifier(),
            count = request.output_count(),
            provider = self.provider.provider_name()
        )
    )]
    pub async fn invoke(&self, request: &GenerationRequest) -> PixagenResult<ProviderResult> {
        let credential = request
            .credential()
            .as_ref()
            .ok_or(GenerationErrorKind::MissingCredential)?;

        let kind = *request.kind();
        if kind.requires_reference_image() && request.primary_image().is_none() {
            let field = match kind {
                GenerationKind::VisionAnalyze => "imageDataURL",
                _ => "productDataURL",
            };
            return Err(GenerationErrorKind::MissingRequiredField(field.to_string()).into());
        }

        let body = build_content_request(request);
        let model = request.model_identifier();

        let result = match kind {
            GenerationKind::Image | GenerationKind::CompositeImage => {
                let outcome = self
                    .run_batch(
                        credential,
                        model,
                        &body,
                        *request.output_count(),
                        MediaFilter::Any,
                    )
                    .await?;
                ProviderResult::Images {
                    images: outcome.media,
                }
            }
            GenerationKind::Video => {
                let outcome = self
                    .run_batch(
                        credential,
                        model,
                        &body,
                        *request.output_count(),
                        MediaFilter::Video,
                    )
                    .await?;
                if outcome.media.is_empty() {
                    ProviderResult::NoMedia {
                        note: NO_VIDEO_NOTE.to_string(),
                        raw: outcome.last_raw,
                    }
                } else {
                    ProviderResult::Video {
                        videos: outcome.media,
                    }
                }
            }
            GenerationKind::EnhanceText => {
                let response = self.call(credential, model, &body, 0).await?;
                ProviderResult::Text {
                    text: extract_text(&response),
                }
            }
            GenerationKind::VisionAnalyze => {
                let response = self.call(credential, model, &body, 0).await?;
                ProviderResult::Insights {
                    insights: parse_insights(&extract_text(&response)),
                }
            }
        };

        info!("Generation job complete");
        Ok(result)
    }

    async fn call(
        &self,
        credential: &Credential,
        model: &str,
        body: &GenerateContentRequest,
        index: u32,
    ) -> Result<crate::GenerateContentResponse, GenerationError> {
        debug!(index, model, "Issuing provider call");
        self.provider.generate_content(credential, model, body).await
    }

    async fn run_batch(
        &self,
        credential: &Credential,
        model: &str,
        body: &GenerateContentRequest,
        count: u32,
        filter: MediaFilter,
    ) -> PixagenResult<BatchOutcome> {
        let mut outcome = BatchOutcome {
            media: Vec::new(),
            last_raw: Value::Null,
        };
        let mut failures = 0u32;
        let mut last_error = None;

        for index in 0..count {
            match self.call(credential, model, body, index).await {
                Ok(response) => match extract_media(&response, filter) {
                    MediaExtraction::Found(media) => outcome.media.push(media),
                    MediaExtraction::NotFound { raw } => {
                        debug!(index, "Provider response carried no usable media");
                        outcome.last_raw = raw;
                    }
                },
                Err(e) if self.policy == BatchPolicy::AbortOnFailure => {
                    warn!(index, error = %e.kind(), "Provider call failed; aborting batch");
                    return Err(e.into());
                }
                Err(e) => {
                    warn!(index, error = %e.kind(), "Provider call failed; continuing batch");
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if failures == count => Err(e.into()),
            _ => Ok(outcome),
        }
    }
}
