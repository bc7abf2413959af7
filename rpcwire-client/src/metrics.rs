//! OpenTelemetry metrics for the call engine
//!
//! - `rpcwire.client.calls.total`: calls settled, by method and status
//! - `rpcwire.client.call.duration`: time from send to settlement, in seconds
//! - `rpcwire.client.errors.total`: failures, by error type
//! - `rpcwire.client.responses.unmatched`: responses whose id matched no call

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Instruments recorded by a [`crate::Client`]
pub struct ClientMetrics {
    pub calls_total: Counter<u64>,
    pub call_duration: Histogram<f64>,
    pub errors_total: Counter<u64>,
    pub unmatched_responses: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        // Meter names must be 'static
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            calls_total: meter
                .u64_counter("rpcwire.client.calls.total")
                .with_description("Total number of calls settled")
                .build(),
            call_duration: meter
                .f64_histogram("rpcwire.client.call.duration")
                .with_description("Call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("rpcwire.client.errors.total")
                .with_description("Total number of errors encountered")
                .build(),
            unmatched_responses: meter
                .u64_counter("rpcwire.client.responses.unmatched")
                .with_description("Responses whose id matched no pending call")
                .build(),
        }
    }

    pub fn record_call(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.calls_total.add(1, attributes);
        self.call_duration.record(duration_secs, attributes);
    }

    pub fn record_error(&self, error_type: &str) {
        let attributes = &[KeyValue::new("error_type", error_type.to_string())];
        self.errors_total.add(1, attributes);
    }

    pub fn record_unmatched(&self) {
        self.unmatched_responses.add(1, &[]);
    }
}
