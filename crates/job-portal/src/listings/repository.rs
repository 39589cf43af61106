use std::sync::Arc;

use super::category::CategoryIndex;
use super::domain::{Category, JobRecord};
use super::facets::FilterFacets;

/// One full copy of the job and category collections plus everything derived from them.
///
/// Snapshots are immutable. A refresh from either source produces a new
/// snapshot with a higher version; nothing is diffed against the previous one.
#[derive(Debug, Default)]
pub struct ListingSnapshot {
    version: u64,
    jobs: Vec<JobRecord>,
    categories: Vec<Category>,
    index: CategoryIndex,
    facets: FilterFacets,
}

impl ListingSnapshot {
    pub fn new(version: u64, jobs: Vec<JobRecord>, categories: Vec<Category>) -> Self {
        let index = CategoryIndex::from_categories(&categories);
        let facets = FilterFacets::from_records(&jobs);
        Self {
            version,
            jobs,
            categories,
            index,
            facets,
        }
    }

    /// Successor snapshot carrying a new job collection.
    pub fn with_jobs(&self, jobs: Vec<JobRecord>) -> Self {
        let facets = FilterFacets::from_records(&jobs);
        Self {
            version: self.version + 1,
            jobs,
            categories: self.categories.clone(),
            index: self.index.clone(),
            facets,
        }
    }

    /// Successor snapshot carrying a new category collection.
    pub fn with_categories(&self, categories: Vec<Category>) -> Self {
        let index = CategoryIndex::from_categories(&categories);
        Self {
            version: self.version + 1,
            jobs: self.jobs.clone(),
            categories,
            index,
            facets: self.facets.clone(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn facets(&self) -> &FilterFacets {
        &self.facets
    }
}

/// Storage abstraction over the live job and category collections.
pub trait ListingRepository: Send + Sync {
    fn current(&self) -> Result<Arc<ListingSnapshot>, RepositoryError>;
    fn replace_jobs(&self, jobs: Vec<JobRecord>) -> Result<Arc<ListingSnapshot>, RepositoryError>;
    fn replace_categories(
        &self,
        categories: Vec<Category>,
    ) -> Result<Arc<ListingSnapshot>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("listing store unavailable: {0}")]
    Unavailable(String),
}
