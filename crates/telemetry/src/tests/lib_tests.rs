use super::*;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, routing::post, Json, Router};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct CollectorState {
    batches: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn handle_traces(State(state): State<CollectorState>, Json(batch): Json<serde_json::Value>) {
    state.batches.lock().await.push(batch);
}

async fn spawn_stub_collector(state: CollectorState) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub collector");
    let addr = listener.local_addr().expect("collector addr");
    let app = Router::new()
        .route("/v1/traces", post(handle_traces))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/v1/traces")
}

async fn refused_collector_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}/v1/traces")
}

#[tokio::test]
async fn exporter_delivers_closed_spans_to_the_collector() {
    let state = CollectorState::default();
    let collector_url = spawn_stub_collector(state.clone()).await;

    let layer = SpanExportLayer {
        queue: spawn_exporter("unit-test".to_string(), collector_url),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, || {
        // A full batch forces an immediate flush instead of waiting out
        // the interval.
        for attempt in 0..EXPORT_BATCH_MAX {
            let span = tracing::info_span!("GET /students", attempt);
            drop(span.enter());
        }
    });

    let mut received = None;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let batches = state.batches.lock().await;
        if let Some(batch) = batches.first() {
            received = Some(batch.clone());
            break;
        }
    }

    let batch = received.expect("collector received a batch");
    assert_eq!(batch["service"], "unit-test");
    let spans = batch["spans"].as_array().expect("spans array");
    assert!(!spans.is_empty());
    assert_eq!(spans[0]["name"], "GET /students");
    assert!(spans[0]["fields"]["attempt"].is_string());
    assert!(spans[0]["started_at"].is_string());
}

#[tokio::test]
async fn unreachable_collector_never_blocks_span_emission() {
    let collector_url = refused_collector_url().await;
    let layer = SpanExportLayer {
        queue: spawn_exporter("unit-test".to_string(), collector_url),
    };
    let subscriber = tracing_subscriber::registry().with(layer);

    let started = Instant::now();
    tracing::subscriber::with_default(subscriber, || {
        // Twice the queue capacity: overflow must drop, not block.
        for _ in 0..(EXPORT_QUEUE_CAPACITY * 2) {
            let span = tracing::info_span!("POST /register");
            drop(span.enter());
        }
    });
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn init_twice_is_a_no_op() {
    init(TelemetryConfig::new("registry-desktop", DEFAULT_COLLECTOR_URL));
    init(TelemetryConfig::new(
        "registry-desktop",
        "http://localhost:1/v1/traces",
    ));
}
