use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryListingRepository};
use crate::routes::with_listing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_portal::config::{AppConfig, ListingSourceConfig};
use job_portal::error::AppError;
use job_portal::listings::{ListingSearchService, SnapshotImporter};
use job_portal::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(jobs) = args.jobs.take() {
        config.listings.jobs_path = Some(jobs);
    }
    if let Some(categories) = args.categories.take() {
        config.listings.categories_path = Some(categories);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(load_repository(&config.listings)?);
    let listing_service = Arc::new(ListingSearchService::new(repository));

    let app = with_listing_routes(listing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job listing service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_repository(sources: &ListingSourceConfig) -> Result<InMemoryListingRepository, AppError> {
    let jobs = match &sources.jobs_path {
        Some(path) => SnapshotImporter::jobs_from_path(path)?,
        None => Vec::new(),
    };
    let categories = match &sources.categories_path {
        Some(path) => SnapshotImporter::categories_from_path(path)?,
        None => Vec::new(),
    };

    info!(
        jobs = jobs.len(),
        categories = categories.len(),
        "initial listing snapshot loaded"
    );
    Ok(InMemoryListingRepository::seeded(jobs, categories))
}
