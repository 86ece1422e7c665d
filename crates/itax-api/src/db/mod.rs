//! # Submission Persistence Layer
//!
//! Stores one row per calculation when a store is configured. The store is
//! an explicit handle carried in [`crate::state::AppState`]; handlers never
//! reach for a process-wide connection.
//!
//! ## Backends
//!
//! - [`postgres::PgSubmissionStore`]: SQLx pool over PostgreSQL, embedded
//!   migrations, `INSERT ... RETURNING`.
//! - [`memory::MemorySubmissionStore`]: in-process substitute for tests and
//!   database-less runs.
//!
//! When no backend is configured the API serves the stateless variant of
//! `/calculate-tax`, which neither requires user fields nor echoes a row.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itax_core::{Submitter, TaxInput, TaxResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::StoreBackend;

/// Failure inside a submission store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Query or connection failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations could not be applied.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The store refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A calculation about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub user_name: String,
    pub user_email: String,
    pub annual_income: f64,
    pub investments: f64,
    pub other_deductions: f64,
    pub other_income: f64,
    pub taxable_income: f64,
    pub tax_payable: f64,
}

impl NewSubmission {
    pub fn new(submitter: Submitter, input: &TaxInput, result: &TaxResult) -> Self {
        Self {
            user_name: submitter.user_name,
            user_email: submitter.user_email,
            annual_income: input.annual_income,
            investments: input.investments,
            other_deductions: input.other_deductions,
            other_income: input.other_income,
            taxable_income: result.taxable_income,
            tax_payable: result.tax_payable,
        }
    }

    /// Assign identity and creation time.
    pub(crate) fn into_record(self) -> SubmissionRecord {
        SubmissionRecord {
            id: Uuid::new_v4(),
            user_name: self.user_name,
            user_email: self.user_email,
            annual_income: self.annual_income,
            investments: self.investments,
            other_deductions: self.other_deductions,
            other_income: self.other_income,
            taxable_income: self.taxable_income,
            tax_payable: self.tax_payable,
            created_at: Utc::now(),
        }
    }
}

/// A stored calculation, as returned in `savedData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub annual_income: f64,
    pub investments: f64,
    pub other_deductions: f64,
    pub other_income: f64,
    pub taxable_income: f64,
    pub tax_payable: f64,
    pub created_at: DateTime<Utc>,
}

/// Backend-agnostic submission storage.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert one submission and return the stored row.
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionRecord, StoreError>;

    /// Verify the backend can serve requests.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Build the store selected by configuration.
///
/// Returns `None` for [`StoreBackend::Disabled`]. Returns `Err` if a
/// database URL is configured but the connection or migration fails.
pub async fn init_store(
    backend: &StoreBackend,
) -> Result<Option<Arc<dyn SubmissionStore>>, StoreError> {
    match backend {
        StoreBackend::Disabled => {
            tracing::info!("No submission store configured; calculations are not persisted");
            Ok(None)
        }
        StoreBackend::Memory => {
            tracing::warn!(
                "Using in-memory submission store (development only). Submissions are unbounded and will not survive restarts."
            );
            Ok(Some(Arc::new(memory::MemorySubmissionStore::new())))
        }
        StoreBackend::Postgres(url) => {
            let store = postgres::PgSubmissionStore::connect(url).await?;
            Ok(Some(Arc::new(store)))
        }
    }
}
