use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::domain::{Category, FilterCriteria, JobRecord};
use super::repository::ListingRepository;
use super::service::{ListingSearchService, ListingServiceError};

/// Router builder exposing search, facet, and snapshot endpoints.
pub fn listing_router<R>(service: Arc<ListingSearchService<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route("/api/v1/jobs", put(replace_jobs_handler::<R>))
        .route("/api/v1/jobs/search", post(search_handler::<R>))
        .route("/api/v1/jobs/facets", get(facets_handler::<R>))
        .route(
            "/api/v1/categories",
            get(categories_handler::<R>).put(replace_categories_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<ListingSearchService<R>>>,
    axum::Json(criteria): axum::Json<FilterCriteria>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.search(&criteria) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn facets_handler<R>(
    State(service): State<Arc<ListingSearchService<R>>>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.facets() {
        Ok(facets) => (StatusCode::OK, axum::Json(facets)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn categories_handler<R>(
    State(service): State<Arc<ListingSearchService<R>>>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.categories() {
        Ok(categories) => (StatusCode::OK, axum::Json(categories)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn replace_jobs_handler<R>(
    State(service): State<Arc<ListingSearchService<R>>>,
    axum::Json(jobs): axum::Json<Vec<JobRecord>>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.replace_jobs(jobs) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn replace_categories_handler<R>(
    State(service): State<Arc<ListingSearchService<R>>>,
    axum::Json(categories): axum::Json<Vec<Category>>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.replace_categories(categories) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error) => service_error(error),
    }
}

fn service_error(error: ListingServiceError) -> Response {
    let status = match &error {
        ListingServiceError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
