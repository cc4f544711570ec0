//! Flush and shutdown of the SDK providers are blocking calls that wait on
//! the batching tasks, which run on the Tokio runtime we are calling from.
//! Each processor/reader is wrapped here so that those calls go through
//! `tokio::task::block_in_place`, letting the runtime hand the core off to
//! another worker instead of deadlocking on itself.

use std::time::Duration;

use opentelemetry_sdk::logs::LogProcessor;
use opentelemetry_sdk::metrics::reader::MetricReader;
use opentelemetry_sdk::trace::SpanProcessor;

#[derive(Debug)]
pub(crate) struct BlockInPlaceSpanProcessor<T: SpanProcessor> {
    inner: T,
}

impl<T: SpanProcessor> BlockInPlaceSpanProcessor<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: SpanProcessor> SpanProcessor for BlockInPlaceSpanProcessor<T> {
    fn on_start(&self, span: &mut opentelemetry_sdk::trace::Span, cx: &opentelemetry::Context) {
        self.inner.on_start(span, cx);
    }

    fn on_end(&self, span: opentelemetry_sdk::trace::SpanData) {
        self.inner.on_end(span);
    }

    fn force_flush(&self) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.force_flush())
    }

    fn shutdown(&self) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.shutdown())
    }

    // The providers call this one internally, so it must take the same
    // deadlock-avoidance path as shutdown()
    fn shutdown_with_timeout(
        &self,
        timeout: Duration,
    ) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.shutdown_with_timeout(timeout))
    }

    // The resource must reach the inner processor, and from there the
    // exporter, or the spans would be exported without it.
    fn set_resource(&mut self, resource: &opentelemetry_sdk::Resource) {
        self.inner.set_resource(resource);
    }
}

#[derive(Debug)]
pub(crate) struct BlockInPlaceLogProcessor<T: LogProcessor> {
    inner: T,
}

impl<T: LogProcessor> BlockInPlaceLogProcessor<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: LogProcessor> LogProcessor for BlockInPlaceLogProcessor<T> {
    fn emit(
        &self,
        record: &mut opentelemetry_sdk::logs::SdkLogRecord,
        instrumentation: &opentelemetry::InstrumentationScope,
    ) {
        self.inner.emit(record, instrumentation);
    }

    fn force_flush(&self) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.force_flush())
    }

    fn shutdown(&self) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.shutdown())
    }

    fn shutdown_with_timeout(
        &self,
        timeout: Duration,
    ) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.shutdown_with_timeout(timeout))
    }

    fn set_resource(&mut self, resource: &opentelemetry_sdk::Resource) {
        self.inner.set_resource(resource);
    }
}

#[derive(Debug)]
pub(crate) struct BlockInPlaceMetricReader<T: MetricReader> {
    inner: T,
}

impl<T: MetricReader> BlockInPlaceMetricReader<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: MetricReader> MetricReader for BlockInPlaceMetricReader<T> {
    fn register_pipeline(&self, pipeline: std::sync::Weak<opentelemetry_sdk::metrics::Pipeline>) {
        self.inner.register_pipeline(pipeline);
    }

    fn collect(
        &self,
        rm: &mut opentelemetry_sdk::metrics::data::ResourceMetrics,
    ) -> opentelemetry_sdk::error::OTelSdkResult {
        self.inner.collect(rm)
    }

    fn force_flush(&self) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.force_flush())
    }

    fn shutdown(&self) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.shutdown())
    }

    fn shutdown_with_timeout(
        &self,
        timeout: Duration,
    ) -> opentelemetry_sdk::error::OTelSdkResult {
        tokio::task::block_in_place(|| self.inner.shutdown_with_timeout(timeout))
    }

    fn temporality(
        &self,
        kind: opentelemetry_sdk::metrics::InstrumentKind,
    ) -> opentelemetry_sdk::metrics::Temporality {
        self.inner.temporality(kind)
    }
}
