use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{TelemetryConfig, TelemetryProtocol};

static INIT: OnceLock<()> = OnceLock::new();
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();
static TELEMETRY_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn init_telemetry(cfg: TelemetryConfig) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let exporters_enabled = cfg.exporter_enabled();
    TELEMETRY_ENABLED.store(exporters_enabled, Ordering::SeqCst);

    init_tracing(&cfg, exporters_enabled)?;

    INIT.set(()).ok();
    Ok(())
}

pub fn telemetry_enabled() -> bool {
    TELEMETRY_ENABLED.load(Ordering::SeqCst)
}

/// Flushes and stops the span exporter. The process is about to exit, so
/// batched spans would otherwise be lost.
pub fn shutdown_telemetry() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(err) = provider.shutdown() {
            tracing::warn!(error = %err, "failed to flush span exporter");
        }
    }
}

// stdout carries workflow commands, so logs always go to stderr.
fn init_tracing(cfg: &TelemetryConfig, enable_exporters: bool) -> Result<()> {
    let fmt_layer = if cfg.json_logs {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if enable_exporters {
        let span_exporter = build_span_exporter(cfg)?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_resource(build_resource(cfg))
            .with_batch_exporter(span_exporter)
            .build();

        let tracer = tracer_provider.tracer(cfg.service_name.clone());
        global::set_tracer_provider(tracer_provider.clone());
        global::set_text_map_propagator(TraceContextPropagator::new());
        TRACER_PROVIDER.set(tracer_provider).ok();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(OpenTelemetryLayer::new(tracer))
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .ok();
    }

    Ok(())
}

fn build_span_exporter(
    cfg: &TelemetryConfig,
) -> Result<SpanExporter, opentelemetry_otlp::ExporterBuildError> {
    match cfg.protocol {
        TelemetryProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(cfg.endpoint.clone())
            .build(),
        TelemetryProtocol::HttpProtobuf => SpanExporter::builder()
            .with_http()
            .with_endpoint(cfg.endpoint.clone())
            .build(),
    }
}

fn build_resource(cfg: &TelemetryConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(cfg.service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", cfg.service_version.clone()),
            KeyValue::new("deployment.environment", cfg.environment.clone()),
        ])
        .build()
}
