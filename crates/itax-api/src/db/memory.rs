//! In-process submission store.
//!
//! Keeps rows in insertion order behind a `parking_lot::RwLock`. The lock is
//! never held across an `.await`.
//!
//! For tests and local development only. Rows are never evicted, so memory
//! grows with every submission and everything is lost on restart. Deployments
//! that persist submissions use [`super::postgres::PgSubmissionStore`].

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{NewSubmission, StoreError, SubmissionRecord, SubmissionStore};

/// Thread-safe, cloneable in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemorySubmissionStore {
    rows: Arc<RwLock<Vec<SubmissionRecord>>>,
}

impl MemorySubmissionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored rows, oldest first.
    pub fn list(&self) -> Vec<SubmissionRecord> {
        self.rows.read().clone()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionRecord, StoreError> {
        let record = submission.into_record();
        self.rows.write().push(record.clone());
        Ok(record)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itax_core::{Submitter, TaxInput};

    fn submission(name: &str, income: f64) -> NewSubmission {
        let input = TaxInput {
            annual_income: income,
            investments: 0.0,
            other_deductions: 0.0,
            other_income: 0.0,
        };
        let submitter = Submitter {
            user_name: name.into(),
            user_email: format!("{name}@example.in"),
        };
        NewSubmission::new(submitter, &input, &input.compute())
    }

    #[tokio::test]
    async fn insert_returns_stored_row() {
        let store = MemorySubmissionStore::new();
        let row = store.insert(submission("meera", 700_000.0)).await.unwrap();
        assert_eq!(row.tax_payable, 20_000.0);
        assert_eq!(store.list(), vec![row]);
    }

    #[tokio::test]
    async fn rows_keep_insertion_order_and_unique_ids() {
        let store = MemorySubmissionStore::new();
        let first = store.insert(submission("a", 1.0)).await.unwrap();
        let second = store.insert(submission("b", 2.0)).await.unwrap();
        assert_ne!(first.id, second.id);
        let names: Vec<_> = store.list().into_iter().map(|r| r.user_name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn clones_share_rows() {
        let store = MemorySubmissionStore::new();
        let handle = store.clone();
        handle.insert(submission("c", 3.0)).await.unwrap();
        assert!(!store.is_empty());
        assert!(store.health_check().await.is_ok());
    }
}
