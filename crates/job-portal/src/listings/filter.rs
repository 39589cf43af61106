use std::collections::{BTreeSet, HashSet};

use super::category::{AllowedCategories, CategoryIndex};
use super::domain::{CitySelection, FilterCriteria, JobRecord};
use super::normalizer::normalize_label;

/// Criteria resolved once per recomputation so each record costs only set lookups.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    categories: AllowedCategories,
    city: Option<String>,
    job_types: HashSet<String>,
    work_modes: HashSet<String>,
    suburbs: HashSet<String>,
    past_only: bool,
}

impl CompiledFilter {
    pub fn new(criteria: &FilterCriteria, index: &CategoryIndex) -> Self {
        let city = match &criteria.city {
            CitySelection::All => None,
            CitySelection::Named(city) => Some(normalize_label(city)).filter(|c| !c.is_empty()),
        };

        Self {
            categories: index.expand(&criteria.categories),
            city,
            job_types: canonical_keys(&criteria.job_types),
            work_modes: canonical_keys(&criteria.work_modes),
            suburbs: canonical_keys(&criteria.suburbs),
            past_only: criteria.past_only,
        }
    }

    /// A record passes only when every filter group accepts it.
    pub fn matches(&self, record: &JobRecord) -> bool {
        self.categories.permits(record.category_labels())
            && self.city_matches(record)
            && selection_contains(&self.job_types, &record.job_type)
            && selection_contains(&self.work_modes, &record.work_mode)
            && selection_contains(&self.suburbs, &record.suburb)
            && (!self.past_only || !record.is_active)
    }

    /// Keeps input order.
    pub fn apply<'a>(&self, records: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    fn city_matches(&self, record: &JobRecord) -> bool {
        match &self.city {
            None => true,
            Some(city) => normalize_label(&record.city) == *city,
        }
    }
}

/// Computes the visible subset of `records` for the given selections.
pub fn filter_listings<'a>(
    records: &'a [JobRecord],
    criteria: &FilterCriteria,
    index: &CategoryIndex,
) -> Vec<&'a JobRecord> {
    CompiledFilter::new(criteria, index).apply(records)
}

fn canonical_keys(selection: &BTreeSet<String>) -> HashSet<String> {
    selection
        .iter()
        .map(|key| normalize_label(key))
        .filter(|key| !key.is_empty())
        .collect()
}

// Empty selection means "any". A blank record value never satisfies a non-empty one.
fn selection_contains(selection: &HashSet<String>, value: &str) -> bool {
    selection.is_empty() || selection.contains(&normalize_label(value))
}
