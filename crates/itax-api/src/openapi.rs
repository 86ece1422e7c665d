//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "itax API",
        version = "0.1.0",
        description = "Indian personal income tax calculation (FY 2024-25 slabs) with optional submission storage.",
        license(name = "MIT")
    ),
    paths(crate::routes::tax::calculate_tax),
    components(schemas(
        crate::routes::tax::CalculateTaxRequest,
        crate::routes::tax::CalculateTaxResponse,
        crate::db::SubmissionRecord,
        crate::error::ErrorBody,
    )),
    tags((name = "tax", description = "Tax calculation"))
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
