//! Server metrics definitions
//!
//! OpenTelemetry instruments for the dispatch engine. They are recorded when
//! observability is enabled via `ServerBuilder::with_observability()` or when
//! explicit metrics are supplied with `ServerBuilder::with_metrics()`.
//!
//! # Metrics Collected
//!
//! - **requests_total**: Requests answered, by method and status (counter)
//! - **request_duration**: Time from ingestion to response sent (histogram)
//! - **errors_total**: Error responses sent, by error type (counter)
//!
//! # Examples
//!
//! ```rust,no_run
//! use rpcwire_server::ServerMetrics;
//!
//! let metrics = ServerMetrics::new("my-service");
//! metrics.record_request("my.method", "success", 0.025);
//! ```

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Server metrics for monitoring
///
/// All metrics are prefixed with `rpcwire.server.*`.
pub struct ServerMetrics {
    /// Total number of requests answered
    pub requests_total: Counter<u64>,
    /// Request processing duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of error responses sent
    pub errors_total: Counter<u64>,
}

impl ServerMetrics {
    /// Create metrics on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        // Meter names must be 'static
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("rpcwire.server.requests.total")
                .with_description("Total number of requests answered")
                .build(),
            request_duration: meter
                .f64_histogram("rpcwire.server.request.duration")
                .with_description("Request processing duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("rpcwire.server.errors.total")
                .with_description("Total number of error responses sent")
                .build(),
        }
    }

    /// Record an answered request
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record an error response, labelled by error type
    pub fn record_error(&self, error_type: &str) {
        let attributes = &[KeyValue::new("error_type", error_type.to_string())];
        self.errors_total.add(1, attributes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = ServerMetrics::new("test-service");

        metrics.record_request("test.method", "success", 0.1);
        metrics.record_request("test.method", "error", 0.2);
        metrics.record_error("method_not_found");
        metrics.record_error("internal_error");
    }
}
