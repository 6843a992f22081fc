//! HTTP gateway for the PixaGen studio.
//!
//! Accepts loosely-shaped JSON from the studio UI on a fixed set of routes,
//! normalizes it, runs the job against Google AI Studio and answers with
//! data URIs, text or parsed JSON.
//!
//! The `metrics` feature adds OpenTelemetry instruments around provider calls.

mod api;
mod config;
mod error;
mod handlers;
#[cfg(feature = "metrics")]
mod metrics;
mod state;

pub use api::{create_router, serve};
pub use config::{
    DEFAULT_BIND_ADDRESS, DEFAULT_BODY_LIMIT_BYTES, ModelCatalog, ServerConfig,
    ServerConfigBuilder, ServerConfigBuilderError,
};
pub use error::ApiError;
pub use handlers::JsonBody;
#[cfg(feature = "metrics")]
pub use metrics::{MeteredProvider, ProviderMetrics, init_metrics};
pub use state::{AppState, SharedProvider};
