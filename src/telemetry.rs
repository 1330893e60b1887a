//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Common labels
//!
//! - `operation`: client call (e.g. "annotate", "tokenize", "pos_tag")
//! - `status`: outcome: "ok" or "error"

/// Total requests sent to the annotation server.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "corenlp_requests_total";

/// Request duration in seconds, measured around the HTTP round trip and body decoding.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "corenlp_request_duration_seconds";

/// Total local servers spawned by clients.
pub const SERVER_LAUNCHES_TOTAL: &str = "corenlp_server_launches_total";
