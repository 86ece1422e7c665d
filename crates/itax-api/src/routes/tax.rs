//! # Tax Calculation API
//!
//! | Method | Path             | Handler         |
//! |--------|------------------|-----------------|
//! | `POST` | `/calculate-tax` | `calculate_tax` |
//!
//! The handler is glue: it hands the raw body to `itax-core` for validation
//! and computation, then optionally persists the submission. With a store
//! configured, `userName` and `userEmail` become required and the stored row
//! is echoed as `savedData`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use itax_core::{RawTaxInput, TaxResult, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::db::{NewSubmission, SubmissionRecord};
use crate::error::AppError;
use crate::extractors::json_or_null;
use crate::middleware::metrics::record_calculation;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Calculation request. Amounts may be JSON numbers or numeric strings.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxRequest {
    /// Gross annual income.
    #[schema(value_type = String, example = "1200000")]
    pub annual_income: Value,
    /// Investments under 80C, 80D and similar sections.
    #[schema(value_type = String, example = "150000")]
    pub investments: Value,
    /// Other deductions (HRA, LTA, ...).
    #[schema(value_type = String, example = "50000")]
    pub other_deductions: Value,
    /// Income from other sources.
    #[schema(value_type = String, example = "0")]
    pub other_income: Value,
    /// Submitter name; required when submissions are stored.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Submitter email; required when submissions are stored.
    #[serde(default)]
    pub user_email: Option<String>,
}

/// Calculation response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxResponse {
    pub taxable_income: f64,
    pub tax_payable: f64,
    pub tax_savings_suggestions: Vec<String>,
    /// The stored row, present only when submissions are persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_data: Option<SubmissionRecord>,
}

impl CalculateTaxResponse {
    fn new(result: TaxResult, saved_data: Option<SubmissionRecord>) -> Self {
        Self {
            taxable_income: result.taxable_income,
            tax_payable: result.tax_payable,
            tax_savings_suggestions: result.tax_savings_suggestions,
            saved_data,
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Construct the tax calculation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/calculate-tax", post(calculate_tax))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /calculate-tax: Compute taxable income and tax payable.
#[utoipa::path(
    post,
    path = "/calculate-tax",
    request_body = CalculateTaxRequest,
    responses(
        (status = 200, description = "Tax computed", body = CalculateTaxResponse),
        (status = 400, description = "Missing or non-numeric field", body = crate::error::ErrorBody),
        (status = 500, description = "Unexpected failure", body = crate::error::ErrorBody),
    ),
    tag = "tax"
)]
pub async fn calculate_tax(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CalculateTaxResponse>, AppError> {
    let raw = RawTaxInput::from_json(&json_or_null(body));
    let outcome = calculate(&state, &raw).await;

    record_calculation(match &outcome {
        Ok(_) => "ok",
        Err(AppError::Validation(err)) => err.code(),
        Err(AppError::Internal(_)) => "error",
    });

    outcome.map(Json)
}

async fn calculate(state: &AppState, raw: &RawTaxInput) -> Result<CalculateTaxResponse, AppError> {
    // User fields join the presence check, so they are validated first.
    let submitter = if state.persists_submissions() {
        Some(raw.submitter()?)
    } else {
        None
    };
    let input = raw.parse().map_err(|err| {
        log_rejection(&err);
        err
    })?;
    let result = input.compute();

    let saved_data = match (&state.store, submitter) {
        (Some(store), Some(submitter)) => {
            let row = store
                .insert(NewSubmission::new(submitter, &input, &result))
                .await?;
            tracing::info!(submission_id = %row.id, "tax submission stored");
            Some(row)
        }
        _ => None,
    };

    tracing::debug!(
        taxable_income = result.taxable_income,
        tax_payable = result.tax_payable,
        "tax calculated"
    );

    Ok(CalculateTaxResponse::new(result, saved_data))
}

fn log_rejection(err: &ValidationError) {
    if let ValidationError::InvalidNumber { field } = err {
        tracing::debug!(field, "rejected non-numeric field");
    }
}
