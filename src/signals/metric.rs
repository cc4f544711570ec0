use std::time::Duration;

use anyhow::{Context as _, Result};
use opentelemetry::metrics::MeterProvider as _;
use opentelemetry::KeyValue;

use crate::config::GeneratorConfig;
use crate::exporter;
use crate::signals::shutdown::BlockInPlaceMetricReader;

pub(crate) const METRIC_NAME: &str = "custom.metric";
pub(crate) const METRIC_VALUE: f64 = 1.0;

fn sample_attributes() -> [KeyValue; 3] {
    [
        KeyValue::new("attribute-a", "attribute-a-value-1"),
        KeyValue::new("job", "custom"),             // For prometheus
        KeyValue::new("instance", "test-instance"), // For prometheus
    ]
}

/// Records the sample gauge data point and pushes it out through a meter
/// provider carrying the shared resource. The reader interval is irrelevant
/// here, the collect happens on shutdown.
pub(crate) fn emit(
    config: &GeneratorConfig,
    resource: &opentelemetry_sdk::Resource,
) -> Result<()> {
    let exporter = exporter::metric::build(config)?;

    let reader = opentelemetry_sdk::metrics::periodic_reader_with_async_runtime::PeriodicReader::builder(
        exporter,
        opentelemetry_sdk::runtime::Tokio,
    )
    .with_interval(Duration::from_secs(60))
    .build();
    let reader = BlockInPlaceMetricReader::new(reader);

    let meter_provider = opentelemetry_sdk::metrics::SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(resource.clone())
        .build();

    let meter = meter_provider.meter(crate::signals::SERVICE_NAME);
    let gauge = meter.f64_gauge(METRIC_NAME).build();
    gauge.record(METRIC_VALUE, &sample_attributes());

    // No force_flush here: shutdown performs a final collect-and-export, and
    // flushing first would export the cumulative gauge a second time.
    meter_provider
        .shutdown()
        .context("Failed to shutdown meter provider")?;

    Ok(())
}
