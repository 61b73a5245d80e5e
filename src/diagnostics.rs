//! Request-scoped diagnostics collection.
//!
//! This is the boundary component around the core: a collector that lives for
//! exactly one HTTP request, accumulates database queries, log messages and
//! model lifecycle event counters, and attaches them as an `_lrd` object to a
//! JSON response body. Non-JSON bodies pass through unmodified.
//!
//! The collector is an explicit object handed to instrumented call sites by
//! the hosting framework; nothing here registers global listeners or mutates
//! ambient state. Collection only activates when the client sent the
//! `X-Request-LRD` header and the application debug flag is on.

use crate::config::DocConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Request header that opts a request into diagnostics capture.
pub const DIAGNOSTICS_HEADER: &str = "X-Request-LRD";

/// Model lifecycle events that describe work in progress rather than an
/// outcome; these are never counted.
const IGNORED_MODEL_EVENTS: [&str; 6] = [
    "booting",
    "retrieving",
    "creating",
    "saving",
    "updating",
    "deleting",
];

/// One executed database query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    pub time_ms: f64,
}

/// One captured log message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: String,
    pub message: String,
}

/// Accumulates diagnostics for the lifetime of one request.
#[derive(Debug)]
pub struct RequestDiagnostics {
    capture_queries: bool,
    capture_logs: bool,
    capture_models: bool,
    queries: Vec<QueryRecord>,
    logs: Vec<LogRecord>,
    models: IndexMap<String, IndexMap<String, u64>>,
}

impl RequestDiagnostics {
    /// Creates a collector for one request, honoring the `hide_*` flags.
    pub fn new(config: &DocConfig) -> Self {
        Self {
            capture_queries: !config.hide_sql_data,
            capture_logs: !config.hide_logs_data,
            capture_models: !config.hide_models_data,
            queries: Vec::new(),
            logs: Vec::new(),
            models: IndexMap::new(),
        }
    }

    /// Whether diagnostics should run for a request at all: the opt-in
    /// header must be present and the application must be in debug mode.
    pub fn is_active(header_present: bool, config: &DocConfig) -> bool {
        header_present && config.debug
    }

    /// Records an executed database query.
    pub fn record_query(&mut self, query: &str, time_ms: f64) {
        if self.capture_queries {
            self.queries.push(QueryRecord {
                query: query.to_string(),
                time_ms,
            });
        }
    }

    /// Records a log message.
    pub fn record_log(&mut self, level: &str, message: &str) {
        if self.capture_logs {
            self.logs.push(LogRecord {
                level: level.to_string(),
                message: message.to_string(),
            });
        }
    }

    /// Counts a model lifecycle event.
    ///
    /// Event names are normalized by dropping any `:`-suffix and any
    /// dotted prefix (`model.created:App\User` counts as `created`).
    /// In-progress events are ignored.
    pub fn record_model_event(&mut self, model: &str, event: &str) {
        if !self.capture_models {
            return;
        }

        let event = event.split(':').next().unwrap_or("");
        let event = event.rsplit('.').next().unwrap_or("").trim();

        if event.is_empty() || IGNORED_MODEL_EVENTS.contains(&event) {
            return;
        }

        let counters = self.models.entry(model.to_string()).or_default();
        *counters.entry(event.to_string()).or_insert(0) += 1;
    }

    /// The `_lrd` payload: accumulated diagnostics plus current memory usage.
    pub fn payload(&self) -> Value {
        json!({
            "queries": self.queries,
            "logs": self.logs,
            "models": self.models,
            "memory": Self::memory_usage(),
        })
    }

    /// Attaches the `_lrd` object to a JSON object body.
    ///
    /// Returns `false` without touching the body when it is not a JSON
    /// object; the response passes through unmodified in that case.
    pub fn attach(&self, body: &mut Value) -> bool {
        match body.as_object_mut() {
            Some(object) => {
                object.insert("_lrd".to_string(), self.payload());
                true
            }
            None => false,
        }
    }

    /// Physical memory usage of the process, formatted in MiB.
    fn memory_usage() -> String {
        let bytes = memory_stats::memory_stats()
            .map(|usage| usage.physical_mem)
            .unwrap_or(0);
        Self::format_memory(bytes)
    }

    /// Formats a byte count as MiB with two decimal places.
    fn format_memory(bytes: usize) -> String {
        format!("{:.2}MB", bytes as f64 / 1_048_576.0)
    }
}
