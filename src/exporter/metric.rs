use std::time::Duration;

use anyhow::{Context as _, Result};
use opentelemetry_otlp::{WithExportConfig as _, WithHttpConfig as _, WithTonicConfig as _};

use crate::config::{GeneratorConfig, OtlpExporterProtocol};

use super::{grpc_metadata, http_protocol, http_signal_endpoint, OTLP_METRICS_HTTP_PATH};

pub(crate) fn build(config: &GeneratorConfig) -> Result<opentelemetry_otlp::MetricExporter> {
    let endpoint = config.resolve_endpoint();

    Ok(match &config.protocol {
        OtlpExporterProtocol::HttpProtobuf | OtlpExporterProtocol::HttpJson => {
            let mut builder = opentelemetry_otlp::MetricExporter::builder()
                .with_http()
                .with_endpoint(http_signal_endpoint(&endpoint, OTLP_METRICS_HTTP_PATH))
                .with_protocol(http_protocol(&config.protocol))
                .with_timeout(Duration::from_secs(5));
            if let Some(headers) = &config.headers {
                builder = builder.with_headers(headers.clone())
            }
            builder
                .build()
                .context("Failed to create OTLP Http metric exporter")?
        }
        OtlpExporterProtocol::Grpc => {
            let mut builder = opentelemetry_otlp::MetricExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .with_protocol(opentelemetry_otlp::Protocol::Grpc)
                .with_compression(opentelemetry_otlp::Compression::Gzip)
                .with_timeout(Duration::from_secs(5));
            if let Some(headers) = &config.headers {
                builder = builder.with_metadata(grpc_metadata(headers)?)
            }
            builder
                .build()
                .context("Failed to create OTLP gRPC metric exporter")?
        }
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 10)]
    async fn test_build_from_config() -> Result<()> {
        for protocol in ["grpc", "http/protobuf", "http/json"] {
            let config: GeneratorConfig = serde_json::from_value(json!(
                {
                    "protocol": protocol,
                    "endpoint": "http://127.0.0.1:4317",
                }
            ))?;
            build(&config)?;
        }
        Ok(())
    }
}
