//! The seam between the invoker and the transport.

use crate::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use pixagen_core::Credential;
use pixagen_error::GenerationError;
use std::sync::Arc;

/// Something that can answer a `generateContent` call.
///
/// Implementations report transport and provider failures as
/// `GenerationErrorKind::ProviderCallFailed` with the provider's own message.
/// A successful response without usable media is still `Ok`.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Issues one call against `model`.
    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError>;
}

#[async_trait]
impl<P> GenerationProvider for Arc<P>
where
    P: GenerationProvider + ?Sized,
{
    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        (**self).generate_content(credential, model, request).await
    }
}
