//! Metrics collection.
//!
//! # Metrics
//! - `blockchain_rpc_requests_total` (counter): node RPCs by method, outcome
//! - `blockchain_rpc_duration_seconds` (histogram): RPC latency by method
//! - `blockchain_submission_failures_total` (counter): rejected submissions by kind

use std::time::Duration;

use metrics::{counter, histogram};

/// Record one node RPC. `outcome` is `ok`, `error` or `timeout`.
pub fn record_rpc_request(method: &'static str, outcome: &'static str, elapsed: Duration) {
    counter!(
        "blockchain_rpc_requests_total",
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("blockchain_rpc_duration_seconds", "method" => method)
        .record(elapsed.as_secs_f64());
}

/// Record a submission the node (or the caller's context) rejected.
pub fn record_submission_failure(kind: &'static str) {
    counter!("blockchain_submission_failures_total", "kind" => kind).increment(1);
}
