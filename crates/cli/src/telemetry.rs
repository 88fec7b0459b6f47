//! Observability wiring.
//!
//! Installs one `tracing-subscriber` registry for the whole process: an
//! `EnvFilter` (`RUST_LOG`, default `info`), a JSON or pretty formatter, and,
//! when an OTLP endpoint is configured, an OpenTelemetry layer exporting spans
//! over gRPC.

use anyhow::Context;
use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

const SERVICE_NAME: &str = "stepmap";

/// Flushes exported spans when dropped.
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(err) = provider.shutdown() {
                eprintln!("stepmap: failed to flush spans: {err}");
            }
        }
    }
}

/// Installs the global subscriber. Call once, inside the tokio runtime.
pub fn init(format: LogFormat, otlp_endpoint: Option<&str>) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let provider = match otlp_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .build()
                .context("building OTLP span exporter")?;
            Some(
                TracerProvider::builder()
                    .with_batch_exporter(exporter, runtime::Tokio)
                    .with_resource(Resource::new([KeyValue::new("service.name", SERVICE_NAME)]))
                    .build(),
            )
        }
        None => None,
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(SERVICE_NAME)));

    let json_layer = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
    });
    let pretty_layer = (format == LogFormat::Pretty).then(|| fmt::layer().pretty());

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    if let Some(endpoint) = otlp_endpoint {
        tracing::info!(endpoint, "Exporting spans over OTLP");
    }

    Ok(TelemetryGuard { provider })
}
