use std::time::SystemTime;

use anyhow::{Context as _, Result};
use opentelemetry::logs::{AnyValue, LogRecord as _, Logger as _, LoggerProvider as _};

use crate::config::GeneratorConfig;
use crate::exporter;
use crate::signals::shutdown::BlockInPlaceLogProcessor;

pub(crate) const LOG_BODY: &str = "log message";

/// Emits the sample log record. The resource travels through the logger
/// provider, which is the supported way to stamp resource attributes onto
/// exported records.
pub(crate) fn emit(config: &GeneratorConfig, resource: &opentelemetry_sdk::Resource) -> Result<()> {
    let exporter = exporter::log::build(config)?;

    let processor = opentelemetry_sdk::logs::log_processor_with_async_runtime::BatchLogProcessor::builder(
        exporter,
        opentelemetry_sdk::runtime::Tokio,
    )
    .build();
    let processor = BlockInPlaceLogProcessor::new(processor);

    let logger_provider = opentelemetry_sdk::logs::SdkLoggerProvider::builder()
        .with_log_processor(processor)
        .with_resource(resource.clone())
        .build();

    let logger = logger_provider.logger(crate::signals::SERVICE_NAME);
    let mut record = logger.create_log_record();
    record.set_timestamp(SystemTime::now());
    record.set_body(AnyValue::from(LOG_BODY));
    record.add_attribute("attribute-b", "attribute-b-value-1");
    logger.emit(record);

    logger_provider
        .force_flush()
        .context("Failed to flush log sample")?;
    logger_provider
        .shutdown()
        .context("Failed to shutdown logger provider")?;

    Ok(())
}
