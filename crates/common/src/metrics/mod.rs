//! Metrics and observability utilities
//!
//! Prometheus metric descriptions and recording helpers with standardized
//! naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all DataForge metrics
pub const METRICS_PREFIX: &str = "dataforge";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.075,  // 75ms
    0.100,  // 100ms
    0.150,  // 150ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
];

/// Buckets for candidate pool sizes
pub const CANDIDATE_BUCKETS: &[f64] = &[0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Recommendation metrics
    describe_counter!(
        format!("{}_recommendations_total", METRICS_PREFIX),
        Unit::Count,
        "Total recommendation requests served"
    );

    describe_histogram!(
        format!("{}_recommendation_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Retrieval plus ranking latency in seconds"
    );

    describe_histogram!(
        format!("{}_recommendation_candidates", METRICS_PREFIX),
        Unit::Count,
        "Candidate pool size per recommendation request"
    );

    describe_counter!(
        format!("{}_retrieval_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Candidate retrieval failures"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a completed recommendation
pub fn record_recommendation(duration_secs: f64, candidate_count: usize, result_count: usize) {
    let outcome = if result_count == 0 { "empty" } else { "ranked" };

    counter!(
        format!("{}_recommendations_total", METRICS_PREFIX),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(format!("{}_recommendation_duration_seconds", METRICS_PREFIX))
        .record(duration_secs);

    histogram!(format!("{}_recommendation_candidates", METRICS_PREFIX))
        .record(candidate_count as f64);
}

/// Helper to record a failed candidate retrieval
pub fn record_retrieval_error() {
    counter!(format!("{}_retrieval_errors_total", METRICS_PREFIX)).increment(1);
}
