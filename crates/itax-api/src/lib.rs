//! # itax-api: Axum API Service for the itax Portal
//!
//! HTTP boundary around the `itax-core` tax engine.
//!
//! ## API Surface
//!
//! | Route                   | Module                | Purpose                       |
//! |-------------------------|-----------------------|-------------------------------|
//! | `POST /calculate-tax`   | [`routes::tax`]       | Tax calculation               |
//! | `GET /openapi.json`     | [`openapi`]           | OpenAPI document              |
//! | `GET /health/liveness`  | this module           | Process is up                 |
//! | `GET /health/readiness` | this module           | Submission store is reachable |
//! | `GET /metrics`          | this module           | Prometheus scrape endpoint    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → CatchPanicLayer → Handler
//! ```
//!
//! CORS is permissive: the calculator form is served from another origin.
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers; computation lives in `itax-core`.
//! - All errors map to `{ "error": "<message>" }` bodies via [`AppError`].

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    with_middleware(
        Router::new()
            .merge(routes::tax::router())
            .merge(openapi::router())
            .route("/health/liveness", get(liveness))
            .route("/health/readiness", get(readiness))
            .route("/metrics", get(prometheus_metrics)),
        state,
    )
}

/// Wrap `routes` in the service middleware stack and bind `state`.
fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 "ready", or 503 when the configured store fails
/// its health check.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(store) = &state.store {
        if let Err(e) = store.health_check().await {
            tracing::warn!("Submission store health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "store unreachable").into_response();
        }
    }
    (StatusCode::OK, "ready").into_response()
}

/// GET /metrics: Prometheus text exposition, 404 when no recorder is installed.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
