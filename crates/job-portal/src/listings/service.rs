use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::domain::{Category, FilterCriteria, JobRecord};
use super::facets::FilterFacets;
use super::filter::CompiledFilter;
use super::repository::{ListingRepository, ListingSnapshot, RepositoryError};

/// Filtered view of the current snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSearchResult {
    pub version: u64,
    pub total: usize,
    pub matched: usize,
    pub jobs: Vec<JobRecord>,
}

/// Acknowledgement returned after a snapshot replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotReceipt {
    pub version: u64,
    pub jobs: usize,
    pub categories: usize,
}

impl SnapshotReceipt {
    fn of(snapshot: &ListingSnapshot) -> Self {
        Self {
            version: snapshot.version(),
            jobs: snapshot.jobs().len(),
            categories: snapshot.categories().len(),
        }
    }
}

/// Service running the filter engine against whatever snapshot the repository holds.
pub struct ListingSearchService<R> {
    repository: Arc<R>,
}

impl<R> ListingSearchService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn search(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<ListingSearchResult, ListingServiceError> {
        let snapshot = self.repository.current()?;
        let filter = CompiledFilter::new(criteria, snapshot.category_index());
        let jobs: Vec<JobRecord> = filter
            .apply(snapshot.jobs())
            .into_iter()
            .cloned()
            .collect();

        debug!(
            version = snapshot.version(),
            total = snapshot.jobs().len(),
            matched = jobs.len(),
            categories = criteria.categories.len(),
            city = criteria.city.as_str(),
            past_only = criteria.past_only,
            "listing search evaluated"
        );

        Ok(ListingSearchResult {
            version: snapshot.version(),
            total: snapshot.jobs().len(),
            matched: jobs.len(),
            jobs,
        })
    }

    pub fn facets(&self) -> Result<FilterFacets, ListingServiceError> {
        Ok(self.repository.current()?.facets().clone())
    }

    pub fn categories(&self) -> Result<Vec<Category>, ListingServiceError> {
        Ok(self.repository.current()?.categories().to_vec())
    }

    pub fn replace_jobs(
        &self,
        jobs: Vec<JobRecord>,
    ) -> Result<SnapshotReceipt, ListingServiceError> {
        let snapshot = self.repository.replace_jobs(jobs)?;
        let receipt = SnapshotReceipt::of(&snapshot);
        info!(version = receipt.version, jobs = receipt.jobs, "job snapshot replaced");
        Ok(receipt)
    }

    pub fn replace_categories(
        &self,
        categories: Vec<Category>,
    ) -> Result<SnapshotReceipt, ListingServiceError> {
        let snapshot = self.repository.replace_categories(categories)?;
        let receipt = SnapshotReceipt::of(&snapshot);
        info!(
            version = receipt.version,
            categories = receipt.categories,
            "category snapshot replaced"
        );
        Ok(receipt)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
