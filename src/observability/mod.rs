//! OpenTelemetry-based observability with file-based trace export.
//!
//! Distributed tracing for the application using the OTLP JSON format with
//! a custom file exporter:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON files
//! ```
//!
//! Traces are written to `<data_dir>/learnbooks-otlp.json`, rotating at
//! 10 MB with 3 retained backups. The filter level is controlled by
//! `RUST_LOG`, then the `trace_level` config option, defaulting to `info`.
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`tracer`]: Custom tracer provider with file export
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
