//! Process-wide telemetry bootstrap: structured logging plus background
//! span export to an HTTP collector.
//!
//! [`init`] runs once at application start, before any other component.
//! Export is fire-and-forget: a full queue or an unreachable collector
//! drops spans and never blocks or degrades the caller.

use std::collections::BTreeMap;
use std::sync::Once;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_COLLECTOR_URL: &str = "http://localhost:4318/v1/traces";

const EXPORT_QUEUE_CAPACITY: usize = 1024;
const EXPORT_BATCH_MAX: usize = 64;
const EXPORT_FLUSH_INTERVAL: Duration = Duration::from_secs(2);
const EXPORT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub collector_url: String,
}

impl TelemetryConfig {
    pub fn new(service_name: impl Into<String>, collector_url: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            collector_url: collector_url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SpanRecord {
    name: &'static str,
    target: &'static str,
    level: String,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    duration_ms: u64,
    fields: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct ExportBatch<'a> {
    service: &'a str,
    spans: &'a [SpanRecord],
}

struct OpenSpan {
    started_at: DateTime<Utc>,
    fields: BTreeMap<String, String>,
}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// Captures span open/close times and fields, then hands finished spans to
/// the background exporter. `try_send` keeps emission non-blocking.
struct SpanExportLayer {
    queue: Sender<SpanRecord>,
}

impl<S> Layer<S> for SpanExportLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = BTreeMap::new();
        attrs.record(&mut FieldVisitor(&mut fields));
        span.extensions_mut().insert(OpenSpan {
            started_at: Utc::now(),
            fields,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(open) = extensions.get_mut::<OpenSpan>() {
            values.record(&mut FieldVisitor(&mut open.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(open) = span.extensions_mut().remove::<OpenSpan>() else {
            return;
        };
        let ended_at = Utc::now();
        let duration_ms = (ended_at - open.started_at).num_milliseconds().max(0) as u64;
        let record = SpanRecord {
            name: span.metadata().name(),
            target: span.metadata().target(),
            level: span.metadata().level().to_string(),
            started_at: open.started_at,
            ended_at,
            duration_ms,
            fields: open.fields,
        };
        let _ = self.queue.try_send(record);
    }
}

fn spawn_exporter(service_name: String, collector_url: String) -> Sender<SpanRecord> {
    let (tx, rx) = bounded(EXPORT_QUEUE_CAPACITY);
    // If the thread cannot start, spans drain into a disconnected channel
    // and emission stays a no-op.
    let _ = thread::Builder::new()
        .name("telemetry-export".to_string())
        .spawn(move || export_loop(service_name, collector_url, rx));
    tx
}

fn export_loop(service_name: String, collector_url: String, rx: Receiver<SpanRecord>) {
    let Ok(runtime) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return;
    };
    let _guard = runtime.enter();
    let http = reqwest::Client::new();
    let mut batch: Vec<SpanRecord> = Vec::new();
    loop {
        match rx.recv_timeout(EXPORT_FLUSH_INTERVAL) {
            Ok(record) => {
                batch.push(record);
                if batch.len() >= EXPORT_BATCH_MAX {
                    flush(&runtime, &http, &service_name, &collector_url, &mut batch);
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                flush(&runtime, &http, &service_name, &collector_url, &mut batch);
            }
            Err(RecvTimeoutError::Disconnected) => {
                // Best-effort final flush; there is no shutdown contract.
                flush(&runtime, &http, &service_name, &collector_url, &mut batch);
                return;
            }
        }
    }
}

fn flush(
    runtime: &tokio::runtime::Runtime,
    http: &reqwest::Client,
    service_name: &str,
    collector_url: &str,
    batch: &mut Vec<SpanRecord>,
) {
    if batch.is_empty() {
        return;
    }
    let spans = std::mem::take(batch);
    let payload = ExportBatch {
        service: service_name,
        spans: &spans,
    };
    // Collector unreachable, slow, or erroring: the batch is dropped.
    let _ = runtime.block_on(
        http.post(collector_url)
            .timeout(EXPORT_REQUEST_TIMEOUT)
            .json(&payload)
            .send(),
    );
}

static INIT: Once = Once::new();

/// Install the env-filtered fmt layer and the span export layer for the
/// whole process. Safe to call more than once; only the first call has any
/// effect, and a subscriber installed elsewhere is left in place.
pub fn init(config: TelemetryConfig) {
    INIT.call_once(|| {
        let export = SpanExportLayer {
            queue: spawn_exporter(config.service_name, config.collector_url),
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .with(export)
            .try_init();
    });
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
