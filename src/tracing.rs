//! Log and trace initialization.
//!
//! Ordinary logs are written to stdout as JSON. Structured event lines on
//! [`events::TARGET`](crate::events::TARGET) bypass the JSON layer and are printed verbatim, one
//! per line. Spans are optionally exported over OTLP.
use opentelemetry::InstrumentationScope;
use opentelemetry::trace::TracerProvider;
use opentelemetry_resource_detectors::{HostResourceDetector, OsResourceDetector};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::resource::{EnvResourceDetector, ResourceDetector};
use tracing::info;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{Error, config, events};

/// The filter directive used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "quotebot=debug";

/// Returns a list of resource detectors to use to enrich OTel attributes.
fn otel_resource_detectors() -> Vec<Box<dyn ResourceDetector>> {
    vec![
        Box::new(EnvResourceDetector::default()),
        Box::new(OsResourceDetector),
        Box::new(HostResourceDetector::default()),
    ]
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`Error::Tracing`] if the OTLP exporter can't be built or a global subscriber is
/// already installed.
pub fn try_init(tracing: &config::TracingConfig) -> Result<(), Error> {
    let telemetry_layer = if tracing.enabled {
        let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .build()
            .map_err(|err| Error::Tracing(Box::new(err)))?;
        let res_detectors = otel_resource_detectors();
        let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
            .with_batch_exporter(otlp_exporter)
            .with_resource(
                Resource::builder_empty()
                    .with_service_name(env!("CARGO_PKG_NAME"))
                    .with_detectors(&res_detectors)
                    .build(),
            )
            .build();
        let scope = InstrumentationScope::builder(env!("CARGO_PKG_NAME"))
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_schema_url("https://opentelemetry.io/schema/1.0.0")
            .build();
        let tracer = provider.tracer_with_scope(scope);

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    let stdout_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_filter(filter_fn(|metadata| metadata.target() != events::TARGET));

    let events_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_writer(std::io::stdout)
        .with_filter(filter_fn(|metadata| metadata.target() == events::TARGET));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_DIRECTIVE.into()),
        )
        .with(telemetry_layer)
        .with(stdout_layer)
        .with(events_layer)
        .try_init()
        .map_err(|err| Error::Tracing(Box::new(err)))?;

    info!(otlp = tracing.enabled, "tracing initialized");

    Ok(())
}
