use anyhow::{Context as _, Result};

use crate::config::GeneratorConfig;
use crate::signals;

/// One-shot emitter of the three sample signals.
pub struct SampleGenerator {
    config: GeneratorConfig,
}

impl SampleGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Sends one metric data point, one log record and one pair of spans,
    /// all carrying the same resource, then flushes everything out.
    ///
    /// Must be called from within a multi-threaded Tokio runtime, since the
    /// export pipelines run on it.
    pub fn run(&self) -> Result<()> {
        let resource = signals::sample_resource();
        tracing::info!(
            endpoint = %self.config.resolve_endpoint(),
            protocol = ?self.config.protocol,
            "Sending sample signals"
        );

        signals::metric::emit(&self.config, &resource)
            .context("Failed to export the metric sample")?;
        tracing::info!("Metric sample exported");

        signals::log::emit(&self.config, &resource).context("Failed to export the log sample")?;
        tracing::info!("Log sample exported");

        signals::trace::emit(&self.config, &resource)
            .context("Failed to export the trace samples")?;
        tracing::info!("Trace samples exported");

        Ok(())
    }
}
