//! # Request Body Extraction
//!
//! The calculation endpoint accepts loosely-typed JSON, so the body is taken
//! as a raw [`serde_json::Value`] and interpreted by `itax-core`.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

/// Unwrap a JSON body, treating an unreadable body as an empty payload.
///
/// Malformed JSON, a wrong content type, or an empty body all yield
/// `Value::Null`, which the input parser reports as missing fields.
pub fn json_or_null(result: Result<Json<Value>, JsonRejection>) -> Value {
    match result {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "unreadable request body");
            Value::Null
        }
    }
}
