//! Tracing initialization and subscriber setup.
//!
//! Wires the `tracing` macros through `tracing-opentelemetry` into the
//! file-based OTLP exporter.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// The filter level comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, defaulting to `info`. Traces land in
/// `<data_dir>/learnbooks-otlp.json` with rotation handled by the writer.
///
/// Initialization failures are swallowed: observability is optional and
/// must never stop the application from starting. Safe to call more than
/// once; only the first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let level = std::env::var("RUST_LOG").ok().unwrap_or_else(|| {
        config
            .trace_level
            .clone()
            .unwrap_or_else(|| "info".to_string())
    });

    let data_dir = crate::infrastructure::paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "LearnBooks",
    )]);

    let trace_file = data_dir.join("learnbooks-otlp.json");
    let provider = tracer::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("learnbooks");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
