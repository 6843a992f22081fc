//! Shared handler state.

use crate::{ModelCatalog, ServerConfig};
use pixagen_core::{ActivityLog, CredentialResolver, Normalizer};
use pixagen_models::{GeminiClient, GenerationProvider, Invoker};
use std::sync::Arc;
use tracing::info;

/// Provider handle shared by every request.
pub type SharedProvider = Arc<dyn GenerationProvider>;

/// Everything a handler needs; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Runs generation jobs
    pub invoker: Arc<Invoker<SharedProvider>>,
    /// Builds canonical requests from raw bodies
    pub normalizer: Arc<Normalizer>,
    /// Header, runtime and environment keys
    pub credentials: Arc<CredentialResolver>,
    /// Recent requests, newest first
    pub activity: Arc<ActivityLog>,
    /// Served by `/api/models`
    pub models: Arc<ModelCatalog>,
}

impl AppState {
    /// Builds state around an explicit provider.
    pub fn new(config: &ServerConfig, provider: SharedProvider) -> Self {
        Self {
            invoker: Arc::new(Invoker::with_policy(provider, *config.batch_policy())),
            normalizer: Arc::new(Normalizer::new(config.alias_table().clone())),
            credentials: Arc::new(CredentialResolver::new(
                config.gemini_api_key().clone(),
                config.veo_api_key().clone(),
            )),
            activity: Arc::new(ActivityLog::new(*config.activity_log_capacity())),
            models: Arc::new(config.models().clone()),
        }
    }

    /// Builds state around a [`GeminiClient`] for the configured endpoint.
    ///
    /// With the `metrics` feature the client is wrapped to record call
    /// counts and latency.
    pub fn from_config(config: &ServerConfig) -> Self {
        let client = GeminiClient::new(config.provider_base_url().clone());
        info!(provider = %client.base_url(), "Using Google AI Studio provider");

        #[cfg(feature = "metrics")]
        let provider: SharedProvider = Arc::new(crate::MeteredProvider::new(client));
        #[cfg(not(feature = "metrics"))]
        let provider: SharedProvider = Arc::new(client);

        Self::new(config, provider)
    }
}
