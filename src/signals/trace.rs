use anyhow::{Context as _, Result};
use opentelemetry::trace::{
    Span as _, SpanContext, SpanId, TraceContextExt as _, TraceFlags, TraceId, TraceState,
    Tracer as _, TracerProvider as _,
};
use opentelemetry::{Context, KeyValue};

use crate::config::GeneratorConfig;
use crate::exporter;
use crate::signals::shutdown::BlockInPlaceSpanProcessor;

pub(crate) const TRACER_SCOPE: &str = "my-tracer";

const SAMPLE_TRACE_ID: [u8; 16] = [
    0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32, 0x10,
];
const SAMPLE_PARENT_SPAN_ID: [u8; 8] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];

/// A fabricated, sampled remote span context. Both sample spans are started
/// from it, so they share the well-known trace id and are siblings under the
/// well-known parent span id.
fn remote_parent_context() -> Context {
    Context::new().with_remote_span_context(SpanContext::new(
        TraceId::from_bytes(SAMPLE_TRACE_ID),
        SpanId::from_bytes(SAMPLE_PARENT_SPAN_ID),
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    ))
}

/// Emits `root-span` and `child-span` under the fabricated remote parent and
/// flushes them out.
pub(crate) fn emit(config: &GeneratorConfig, resource: &opentelemetry_sdk::Resource) -> Result<()> {
    let exporter = exporter::trace::build(config)?;

    let processor = opentelemetry_sdk::trace::span_processor_with_async_runtime::BatchSpanProcessor::builder(
        exporter,
        opentelemetry_sdk::runtime::Tokio,
    )
    .build();
    let processor = BlockInPlaceSpanProcessor::new(processor);

    let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_span_processor(processor)
        .with_resource(resource.clone())
        .build();

    let tracer = tracer_provider.tracer(TRACER_SCOPE);
    let parent_cx = remote_parent_context();

    let mut root_span = tracer
        .span_builder("root-span")
        .with_attributes([KeyValue::new("attribute-c", "attribute-c-value-1")])
        .start_with_context(&tracer, &parent_cx);

    let mut child_span = tracer.start_with_context("child-span", &parent_cx);
    child_span.end();

    root_span.end();

    tracer_provider
        .force_flush()
        .context("Failed to flush trace samples")?;
    tracer_provider
        .shutdown()
        .context("Failed to shutdown tracer provider")?;

    Ok(())
}
