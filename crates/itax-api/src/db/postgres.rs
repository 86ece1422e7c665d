//! PostgreSQL submission store.
//!
//! Operates on the `tax_submissions` table. Rows are immutable once
//! inserted; there are no update or delete operations.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{NewSubmission, StoreError, SubmissionRecord, SubmissionStore};

/// SQLx-backed store. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    /// Connect to `url` and apply embedded migrations.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(url)
            .await?;
        tracing::info!("Connected to PostgreSQL");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionRecord, StoreError> {
        let record = submission.into_record();
        let row = sqlx::query_as::<_, SubmissionRecord>(
            "INSERT INTO tax_submissions (id, user_name, user_email, annual_income,
             investments, other_deductions, other_income, taxable_income,
             tax_payable, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING id, user_name, user_email, annual_income, investments,
             other_deductions, other_income, taxable_income, tax_payable, created_at",
        )
        .bind(record.id)
        .bind(&record.user_name)
        .bind(&record.user_email)
        .bind(record.annual_income)
        .bind(record.investments)
        .bind(record.other_deductions)
        .bind(record.other_income)
        .bind(record.taxable_income)
        .bind(record.tax_payable)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
