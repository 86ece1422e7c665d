//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Validation failures carry their fixed client message; every other failure
//! collapses to one generic 500 message and the cause is only logged.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use itax_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::StoreError;

/// Client-facing message for any failure that is not a validation error.
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while calculating tax.";

/// JSON error response body: `{ "error": "<message>" }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request payload failed validation (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Anything else (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(err) => err.to_string(),
            Self::Internal(_) => {
                tracing::error!(error = %self, "tax calculation failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Response for a handler panic caught by `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
