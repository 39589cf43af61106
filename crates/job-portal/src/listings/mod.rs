//! Job listing filtering: the filter engine, the option lists behind the
//! filter popup, and the snapshot plumbing that feeds both.
//!
//! The engine itself (`filter`) is a pure function over one snapshot of
//! records. Everything else here exists to get snapshots in and results out.

pub mod category;
pub mod domain;
pub mod facets;
pub mod filter;
pub mod normalizer;
pub mod repository;
pub mod router;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use category::{AllowedCategories, CategoryIndex};
pub use domain::{Category, CitySelection, FilterCriteria, JobRecord};
pub use facets::{
    distinct_job_types, distinct_work_modes, CitySuburbIndex, CitySuburbs, FilterFacets,
};
pub use filter::{filter_listings, CompiledFilter};
pub use normalizer::normalize_label;
pub use repository::{ListingRepository, ListingSnapshot, RepositoryError};
pub use router::listing_router;
pub use service::{ListingSearchResult, ListingSearchService, ListingServiceError, SnapshotReceipt};
pub use snapshot::{SnapshotImportError, SnapshotImporter};
