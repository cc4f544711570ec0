use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Environment variable consulted when no endpoint is configured explicitly.
pub const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Default OTLP endpoint, a collector listening on the local gRPC port.
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Endpoint of the collector to send the samples to. When unset, the
    /// `OTEL_EXPORTER_OTLP_ENDPOINT` environment variable is consulted and
    /// finally a local collector default is assumed.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub protocol: OtlpExporterProtocol,

    /// Extra headers to send with each export request. Converted to tonic
    /// metadata for gRPC and to plain HTTP headers otherwise.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub enum OtlpExporterProtocol {
    #[serde(rename = "http/protobuf")]
    HttpProtobuf,
    #[serde(rename = "http/json")]
    HttpJson,
    #[default]
    #[serde(rename = "grpc")]
    Grpc,
}

impl GeneratorConfig {
    /// Resolves the endpoint to export to. An empty environment variable
    /// counts as unset.
    pub fn resolve_endpoint(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.clone();
        }

        match std::env::var(OTLP_ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.is_empty() => endpoint,
            _ => DEFAULT_OTLP_ENDPOINT.to_owned(),
        }
    }
}
