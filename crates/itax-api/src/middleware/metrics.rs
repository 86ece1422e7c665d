//! # Request Metrics
//!
//! Counts HTTP requests through the `metrics` facade. The exporter is
//! installed by the binary; without one, recording is a no-op.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const HTTP_REQUESTS_TOTAL: &str = "itax_http_requests_total";
pub const TAX_CALCULATIONS_TOTAL: &str = "itax_tax_calculations_total";

/// Install the global Prometheus recorder and return its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    metrics::describe_counter!(HTTP_REQUESTS_TOTAL, "HTTP requests by method and status");
    metrics::describe_counter!(
        TAX_CALCULATIONS_TOTAL,
        "Tax calculation requests by outcome"
    );
    Ok(handle)
}

/// Record one calculation outcome (`ok`, `missing_fields`, `invalid_number`, `error`).
pub fn record_calculation(outcome: &'static str) {
    metrics::counter!(TAX_CALCULATIONS_TOTAL, "outcome" => outcome).increment(1);
}

/// Middleware that counts every request by method and response status.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let response = next.run(request).await;
    let status = response.status().as_u16().to_string();
    metrics::counter!(HTTP_REQUESTS_TOTAL, "method" => method, "status" => status).increment(1);
    response
}
