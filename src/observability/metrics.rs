//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mock_requests_total` (counter): interception outcomes by `outcome`
//!   (`served`, `delegated`, `bypassed`)
//! - `mock_fixture_errors_total` (counter): fixtures that existed but could
//!   not be read or parsed
//! - `upstream_requests_total` (counter): forwarded requests by `status`
//! - `upstream_request_duration_seconds` (histogram): forwarding latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_decision(outcome: &'static str) {
    counter!("mock_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_fixture_error() {
    counter!("mock_fixture_errors_total").increment(1);
}

pub fn record_upstream(status: u16, start_time: Instant) {
    counter!("upstream_requests_total", "status" => status.to_string()).increment(1);
    histogram!("upstream_request_duration_seconds").record(start_time.elapsed().as_secs_f64());
}
