use job_portal::listings::{
    Category, JobRecord, ListingRepository, ListingSnapshot, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Holds the latest snapshot pushed by the job and category sources.
#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    snapshot: Arc<RwLock<Arc<ListingSnapshot>>>,
}

impl InMemoryListingRepository {
    pub(crate) fn seeded(jobs: Vec<JobRecord>, categories: Vec<Category>) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Arc::new(ListingSnapshot::new(
                1, jobs, categories,
            )))),
        }
    }

    fn swap<F>(&self, next: F) -> Result<Arc<ListingSnapshot>, RepositoryError>
    where
        F: FnOnce(&ListingSnapshot) -> ListingSnapshot,
    {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| RepositoryError::Unavailable("snapshot lock poisoned".to_string()))?;
        let replacement = Arc::new(next(&guard));
        *guard = replacement.clone();
        Ok(replacement)
    }
}

impl ListingRepository for InMemoryListingRepository {
    fn current(&self) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        let guard = self
            .snapshot
            .read()
            .map_err(|_| RepositoryError::Unavailable("snapshot lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn replace_jobs(&self, jobs: Vec<JobRecord>) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        self.swap(|current| current.with_jobs(jobs))
    }

    fn replace_categories(
        &self,
        categories: Vec<Category>,
    ) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        self.swap(|current| current.with_categories(categories))
    }
}
