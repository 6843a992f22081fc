//! OpenTelemetry metrics for provider calls.
//!
//! Available with the `metrics` feature.

use async_trait::async_trait;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
use opentelemetry_stdout::MetricExporter as StdoutExporter;
use pixagen_core::Credential;
use pixagen_error::{GenerationError, GenerationErrorKind};
use pixagen_models::{GenerateContentRequest, GenerateContentResponse, GenerationProvider};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Installs a global meter provider exporting to stdout every
/// `export_interval_secs`.
#[instrument(skip_all, fields(service_name))]
pub fn init_metrics(service_name: &'static str, export_interval_secs: u64) -> SdkMeterProvider {
    info!(
        service_name,
        export_interval_secs, "Initializing OpenTelemetry metrics"
    );
    let resource = Resource::builder_empty()
        .with_attributes([KeyValue::new("service.name", service_name)])
        .build();

    let reader = PeriodicReader::builder(StdoutExporter::default())
        .with_interval(Duration::from_secs(export_interval_secs))
        .build();

    let provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build();
    global::set_meter_provider(provider.clone());
    debug!("Meter provider registered globally");
    provider
}

/// Provider call instruments.
#[derive(Clone)]
pub struct ProviderMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Provider calls issued
    pub calls: Counter<u64>,
    /// Provider calls that failed
    pub failures: Counter<u64>,
    /// Provider call latency in seconds
    pub duration: Histogram<f64>,
}

impl ProviderMetrics {
    /// Instruments on the global `pixagen_provider` meter.
    pub fn new() -> Self {
        let meter = global::meter("pixagen_provider");
        Self {
            _meter: meter.clone(),
            calls: meter
                .u64_counter("provider.calls")
                .with_description("Provider calls issued")
                .build(),
            failures: meter
                .u64_counter("provider.failures")
                .with_description("Provider calls that failed")
                .build(),
            duration: meter
                .f64_histogram("provider.duration")
                .with_unit("seconds")
                .with_description("Provider call latency")
                .build(),
        }
    }

    /// Records one finished call.
    pub fn record(&self, model: &str, duration_secs: f64, failure: Option<&GenerationErrorKind>) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.calls.add(1, labels);
        self.duration.record(duration_secs, labels);
        if let Some(kind) = failure {
            let status = match kind {
                GenerationErrorKind::ProviderCallFailed {
                    status: Some(status),
                    ..
                } => i64::from(*status),
                _ => 0,
            };
            self.failures.add(
                1,
                &[
                    KeyValue::new("model", model.to_string()),
                    KeyValue::new("status", status),
                ],
            );
        }
    }
}

impl Default for ProviderMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps a provider and records [`ProviderMetrics`] for every call.
pub struct MeteredProvider<P> {
    inner: P,
    metrics: ProviderMetrics,
}

impl<P> MeteredProvider<P> {
    /// Wraps `inner` using instruments from the global meter.
    pub fn new(inner: P) -> Self {
        Self::with_metrics(inner, ProviderMetrics::new())
    }

    /// Wraps `inner` with explicit instruments.
    pub fn with_metrics(inner: P, metrics: ProviderMetrics) -> Self {
        Self { inner, metrics }
    }
}

#[async_trait]
impl<P> GenerationProvider for MeteredProvider<P>
where
    P: GenerationProvider,
{
    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let started = Instant::now();
        let result = self.inner.generate_content(credential, model, request).await;
        self.metrics.record(
            model,
            started.elapsed().as_secs_f64(),
            result.as_ref().err().map(GenerationError::kind),
        );
        result
    }
}
