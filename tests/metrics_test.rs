//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use corenlp_client::{CoreNlpClient, telemetry};

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

/// Sum counter values matching a metric name and, optionally, a status label.
fn counter_total(snapshot: &SnapshotVec, name: &str, status: Option<&str>) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .filter(|(key, _, _, _)| match status {
            Some(status) => key
                .key()
                .labels()
                .any(|l| l.key() == "status" && l.value() == status),
            None => true,
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` keeps the sync `with_local_recorder` closure on the
/// current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_request_records_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let mock_server = MockServer::start().await;
                Mock::given(method("POST"))
                    .respond_with(
                        ResponseTemplate::new(200)
                            .set_body_json(serde_json::json!({"sentences": []})),
                    )
                    .mount(&mock_server)
                    .await;
                let client = CoreNlpClient::new(mock_server.uri())?;
                client.pos_tag("Hello.").await
            })
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_total(&snapshot, telemetry::REQUESTS_TOTAL, Some("ok")),
        1
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::REQUESTS_TOTAL, Some("error")),
        0
    );
    assert!(has_histogram(
        &snapshot,
        telemetry::REQUEST_DURATION_SECONDS
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_request_records_error_status() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let mock_server = MockServer::start().await;
                Mock::given(method("POST"))
                    .respond_with(ResponseTemplate::new(503))
                    .mount(&mock_server)
                    .await;
                let client = CoreNlpClient::new(mock_server.uri())?;
                client.tokenize("Hello.", true).await
            })
        })
    });
    assert!(result.is_err());

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_total(&snapshot, telemetry::REQUESTS_TOTAL, Some("error")),
        1
    );
    assert_eq!(counter_total(&snapshot, telemetry::REQUESTS_TOTAL, None), 1);
}

#[test]
fn metric_names_are_prefixed() {
    for name in [
        telemetry::REQUESTS_TOTAL,
        telemetry::REQUEST_DURATION_SECONDS,
        telemetry::SERVER_LAUNCHES_TOTAL,
    ] {
        assert!(name.starts_with("corenlp_"), "{name}");
    }
}
