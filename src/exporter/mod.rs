use std::collections::HashMap;

use anyhow::{Context as _, Result};

use crate::config::OtlpExporterProtocol;

pub(crate) mod log;
pub(crate) mod metric;
pub(crate) mod trace;

pub(crate) const OTLP_METRICS_HTTP_PATH: &str = "v1/metrics";
pub(crate) const OTLP_LOGS_HTTP_PATH: &str = "v1/logs";
pub(crate) const OTLP_TRACES_HTTP_PATH: &str = "v1/traces";

/// The configured endpoint is a base URL for the HTTP transports, so the
/// standard per-signal path is appended here. For gRPC the endpoint is passed
/// to tonic verbatim.
pub(crate) fn http_signal_endpoint(endpoint: &str, signal_path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        signal_path.trim_start_matches('/')
    )
}

pub(crate) fn http_protocol(protocol: &OtlpExporterProtocol) -> opentelemetry_otlp::Protocol {
    match protocol {
        OtlpExporterProtocol::HttpProtobuf => opentelemetry_otlp::Protocol::HttpBinary,
        OtlpExporterProtocol::HttpJson => opentelemetry_otlp::Protocol::HttpJson,
        OtlpExporterProtocol::Grpc => unreachable!(),
    }
}

pub(crate) fn grpc_metadata(
    headers: &HashMap<String, String>,
) -> Result<tonic::metadata::MetadataMap> {
    Ok(tonic::metadata::MetadataMap::from_headers(
        http::HeaderMap::try_from(headers).context("Failed to parse to HTTP headers")?,
    ))
}
