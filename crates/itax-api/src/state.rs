//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds no per-request data.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::db::SubmissionStore;

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    /// Submission store. `None` selects the stateless calculation variant.
    pub store: Option<Arc<dyn SubmissionStore>>,
    /// Prometheus render handle, present when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.as_ref().map(|_| "configured"))
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// State with no store and no metrics recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a submission store.
    pub fn with_store(mut self, store: Arc<dyn SubmissionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Attach a Prometheus render handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Whether calculations are persisted.
    pub fn persists_submissions(&self) -> bool {
        self.store.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemorySubmissionStore;

    #[test]
    fn persistence_follows_store_presence() {
        assert!(!AppState::new().persists_submissions());
        let state = AppState::new().with_store(Arc::new(MemorySubmissionStore::new()));
        assert!(state.persists_submissions());
        assert!(format!("{state:?}").contains("configured"));
    }
}
