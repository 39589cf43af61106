use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::listings::domain::{Category, JobRecord};
use crate::listings::repository::{ListingRepository, ListingSnapshot, RepositoryError};
use crate::listings::service::ListingSearchService;

pub(super) fn job(
    id: &str,
    category: &str,
    city: &str,
    suburb: &str,
    job_type: &str,
    work_mode: &str,
) -> JobRecord {
    JobRecord {
        company: "Harbour Works".to_string(),
        categories: if category.is_empty() {
            Vec::new()
        } else {
            vec![category.to_string()]
        },
        city: city.to_string(),
        suburb: suburb.to_string(),
        job_type: job_type.to_string(),
        work_mode: work_mode.to_string(),
        ..JobRecord::new(id, format!("Listing {id}"))
    }
}

pub(super) fn sample_jobs() -> Vec<JobRecord> {
    let mut closed = job("j-5", "Barista", "Perth", "Fremantle", "Casual", "On-site");
    closed.is_active = false;

    vec![
        job("j-1", "Welding", "Sydney", "Bondi", "Full-time", "On-site"),
        job("j-2", "Plumbing", "Sydney", "Newtown", "Contract", "On-site"),
        job("j-3", "Trades", "Melbourne", "Fitzroy", "Full-time", "Hybrid"),
        job("j-4", "Accounting", "Sydney", "Bondi", "Part-time", "Remote"),
        closed,
        job("j-6", "", "", "", "", ""),
    ]
}

pub(super) fn sample_categories() -> Vec<Category> {
    vec![
        Category::new("Trades", ["Welding", "Plumbing"]),
        Category::new("Hospitality", ["Barista", "Chef"]),
        Category::new("Finance", ["Accounting"]),
    ]
}

pub(super) fn ids(jobs: &[&JobRecord]) -> Vec<String> {
    jobs.iter().map(|job| job.id.clone()).collect()
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    snapshot: Mutex<Arc<ListingSnapshot>>,
}

impl MemoryRepository {
    pub(super) fn seeded(jobs: Vec<JobRecord>, categories: Vec<Category>) -> Self {
        Self {
            snapshot: Mutex::new(Arc::new(ListingSnapshot::new(1, jobs, categories))),
        }
    }
}

impl ListingRepository for MemoryRepository {
    fn current(&self) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        Ok(self.snapshot.lock().expect("snapshot mutex poisoned").clone())
    }

    fn replace_jobs(&self, jobs: Vec<JobRecord>) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        let mut guard = self.snapshot.lock().expect("snapshot mutex poisoned");
        *guard = Arc::new(guard.with_jobs(jobs));
        Ok(guard.clone())
    }

    fn replace_categories(
        &self,
        categories: Vec<Category>,
    ) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        let mut guard = self.snapshot.lock().expect("snapshot mutex poisoned");
        *guard = Arc::new(guard.with_categories(categories));
        Ok(guard.clone())
    }
}

pub(super) struct UnavailableRepository;

impl ListingRepository for UnavailableRepository {
    fn current(&self) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn replace_jobs(&self, _jobs: Vec<JobRecord>) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn replace_categories(
        &self,
        _categories: Vec<Category>,
    ) -> Result<Arc<ListingSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }
}

pub(super) fn seeded_service() -> Arc<ListingSearchService<MemoryRepository>> {
    Arc::new(ListingSearchService::new(Arc::new(
        MemoryRepository::seeded(sample_jobs(), sample_categories()),
    )))
}

pub(super) async fn body_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
