//! Runs the generator against an in-process mock collector and checks that
//! the resource attributes show up on all three signal types, together with
//! the fixed sample payloads.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use opentelemetry_proto::tonic::collector::logs::v1::{
    ExportLogsServiceRequest, ExportLogsServiceResponse,
};
use opentelemetry_proto::tonic::collector::metrics::v1::{
    ExportMetricsServiceRequest, ExportMetricsServiceResponse,
};
use opentelemetry_proto::tonic::collector::trace::v1::{
    ExportTraceServiceRequest, ExportTraceServiceResponse,
};
use opentelemetry_proto::tonic::common::v1::{any_value, KeyValue};
use opentelemetry_proto::tonic::metrics::v1::metric::Data;
use opentelemetry_proto::tonic::metrics::v1::number_data_point;
use prost::Message;
use serde_json::json;

use sample_generator::config::GeneratorConfig;
use sample_generator::generator::SampleGenerator;

#[derive(Default)]
struct Collected {
    traces: Vec<ExportTraceServiceRequest>,
    metrics: Vec<ExportMetricsServiceRequest>,
    logs: Vec<ExportLogsServiceRequest>,
}

type SharedCollected = Arc<Mutex<Collected>>;

fn proto_response(msg: impl Message) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/x-protobuf")],
        msg.encode_to_vec(),
    )
}

async fn collect_traces(State(state): State<SharedCollected>, body: Bytes) -> impl IntoResponse {
    let request = ExportTraceServiceRequest::decode(body).unwrap();
    state.lock().unwrap().traces.push(request);
    proto_response(ExportTraceServiceResponse::default())
}

async fn collect_metrics(State(state): State<SharedCollected>, body: Bytes) -> impl IntoResponse {
    let request = ExportMetricsServiceRequest::decode(body).unwrap();
    state.lock().unwrap().metrics.push(request);
    proto_response(ExportMetricsServiceResponse::default())
}

async fn collect_logs(State(state): State<SharedCollected>, body: Bytes) -> impl IntoResponse {
    let request = ExportLogsServiceRequest::decode(body).unwrap();
    state.lock().unwrap().logs.push(request);
    proto_response(ExportLogsServiceResponse::default())
}

async fn spawn_mock_collector() -> Result<(SharedCollected, std::net::SocketAddr)> {
    let state = SharedCollected::default();

    let app = Router::new()
        .route("/v1/traces", post(collect_traces))
        .route("/v1/metrics", post(collect_metrics))
        .route("/v1/logs", post(collect_logs))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok((state, addr))
}

fn string_attribute(attributes: &[KeyValue], key: &str) -> Option<String> {
    attributes
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.as_ref())
        .and_then(|v| v.value.as_ref())
        .and_then(|v| match v {
            any_value::Value::StringValue(s) => Some(s.clone()),
            _ => None,
        })
}

fn assert_sample_resource(attributes: &[KeyValue]) {
    assert_eq!(
        string_attribute(attributes, "service.name").as_deref(),
        Some("sample-generator")
    );
    assert_eq!(
        string_attribute(attributes, "resource-attribute-1").as_deref(),
        Some("resource-attribute-value-1")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 10)]
async fn test_resource_propagates_to_all_signals() -> Result<()> {
    let (state, addr) = spawn_mock_collector().await?;

    let config: GeneratorConfig = serde_json::from_value(json!(
        {
            "protocol": "http/protobuf",
            "endpoint": format!("http://{addr}"),
        }
    ))?;
    SampleGenerator::new(config).run()?;

    let collected = state.lock().unwrap();

    // Metric signal
    let resource_metrics: Vec<_> = collected
        .metrics
        .iter()
        .flat_map(|r| &r.resource_metrics)
        .collect();
    assert!(!resource_metrics.is_empty());
    for resource_metric in &resource_metrics {
        assert_sample_resource(&resource_metric.resource.as_ref().unwrap().attributes);
    }
    let metrics: Vec<_> = resource_metrics
        .iter()
        .flat_map(|rm| &rm.scope_metrics)
        .flat_map(|sm| &sm.metrics)
        .collect();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].name, "custom.metric");
    let Some(Data::Gauge(gauge)) = &metrics[0].data else {
        panic!("expected a gauge, got {:?}", metrics[0].data);
    };
    assert_eq!(gauge.data_points.len(), 1);
    let data_point = &gauge.data_points[0];
    assert_eq!(
        data_point.value,
        Some(number_data_point::Value::AsDouble(1.0))
    );
    assert_eq!(
        string_attribute(&data_point.attributes, "attribute-a").as_deref(),
        Some("attribute-a-value-1")
    );
    assert_eq!(
        string_attribute(&data_point.attributes, "job").as_deref(),
        Some("custom")
    );
    assert_eq!(
        string_attribute(&data_point.attributes, "instance").as_deref(),
        Some("test-instance")
    );

    // Log signal
    let resource_logs: Vec<_> = collected.logs.iter().flat_map(|r| &r.resource_logs).collect();
    assert!(!resource_logs.is_empty());
    for resource_log in &resource_logs {
        assert_sample_resource(&resource_log.resource.as_ref().unwrap().attributes);
    }
    let records: Vec<_> = resource_logs
        .iter()
        .flat_map(|rl| &rl.scope_logs)
        .flat_map(|sl| &sl.log_records)
        .collect();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(
        record.body.as_ref().and_then(|b| b.value.as_ref()),
        Some(&any_value::Value::StringValue("log message".to_owned()))
    );
    assert_eq!(
        string_attribute(&record.attributes, "attribute-b").as_deref(),
        Some("attribute-b-value-1")
    );
    assert_ne!(record.time_unix_nano, 0);

    // Trace signal
    let resource_spans: Vec<_> = collected
        .traces
        .iter()
        .flat_map(|r| &r.resource_spans)
        .collect();
    assert!(!resource_spans.is_empty());
    for resource_span in &resource_spans {
        assert_sample_resource(&resource_span.resource.as_ref().unwrap().attributes);
    }
    let scope_spans: Vec<_> = resource_spans.iter().flat_map(|rs| &rs.scope_spans).collect();
    for scope_span in &scope_spans {
        assert_eq!(scope_span.scope.as_ref().unwrap().name, "my-tracer");
    }
    let spans: Vec<_> = scope_spans.iter().flat_map(|ss| &ss.spans).collect();
    assert_eq!(spans.len(), 2);
    let expected_trace_id: Vec<u8> = vec![
        0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];
    let expected_parent_span_id: Vec<u8> = vec![0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
    for span in &spans {
        // Both spans inherit the fabricated trace id and are siblings under
        // the fabricated remote parent
        assert_eq!(span.trace_id, expected_trace_id);
        assert_eq!(span.parent_span_id, expected_parent_span_id);
    }
    let root_span = spans
        .iter()
        .find(|s| s.name == "root-span")
        .expect("root-span not exported");
    assert_eq!(
        string_attribute(&root_span.attributes, "attribute-c").as_deref(),
        Some("attribute-c-value-1")
    );
    let child_span = spans
        .iter()
        .find(|s| s.name == "child-span")
        .expect("child-span not exported");
    assert!(child_span.attributes.is_empty());
    assert_ne!(root_span.span_id, child_span.span_id);

    Ok(())
}
