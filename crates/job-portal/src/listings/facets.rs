use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::JobRecord;
use super::normalizer::{locale_cmp, normalize_label};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitySuburbs {
    pub city: String,
    pub suburbs: Vec<String>,
}

/// Suburbs grouped under the city they were listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CitySuburbIndex {
    entries: Vec<CitySuburbs>,
}

impl CitySuburbIndex {
    /// Records without a city or suburb contribute nothing.
    pub fn from_records(records: &[JobRecord]) -> Self {
        let mut grouped: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for record in records {
            let city = record.city.trim();
            let suburb = record.suburb.trim();
            if city.is_empty() || suburb.is_empty() {
                continue;
            }
            grouped.entry(city).or_default().insert(suburb);
        }

        let mut entries: Vec<CitySuburbs> = grouped
            .into_iter()
            .map(|(city, suburbs)| CitySuburbs {
                city: city.to_string(),
                suburbs: sorted_labels(suburbs),
            })
            .collect();
        entries.sort_by(|left, right| locale_cmp(&left.city, &right.city));

        Self { entries }
    }

    pub fn entries(&self) -> &[CitySuburbs] {
        &self.entries
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.city.as_str())
    }

    /// Suburbs for every city whose name normalizes to `city`.
    pub fn suburbs_for(&self, city: &str) -> Vec<&str> {
        let key = normalize_label(city);
        let mut suburbs: Vec<&str> = self
            .entries
            .iter()
            .filter(|entry| normalize_label(&entry.city) == key)
            .flat_map(|entry| entry.suburbs.iter().map(String::as_str))
            .collect();
        suburbs.sort_by(|left, right| locale_cmp(left, right));
        suburbs.dedup();
        suburbs
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Option lists backing the filter popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterFacets {
    pub cities: CitySuburbIndex,
    pub job_types: Vec<String>,
    pub work_modes: Vec<String>,
}

impl FilterFacets {
    pub fn from_records(records: &[JobRecord]) -> Self {
        Self {
            cities: CitySuburbIndex::from_records(records),
            job_types: distinct_job_types(records),
            work_modes: distinct_work_modes(records),
        }
    }
}

/// Job type labels as written, deduplicated case-sensitively.
pub fn distinct_job_types(records: &[JobRecord]) -> Vec<String> {
    distinct_labels(records.iter().map(|record| record.job_type.as_str()))
}

pub fn distinct_work_modes(records: &[JobRecord]) -> Vec<String> {
    distinct_labels(records.iter().map(|record| record.work_mode.as_str()))
}

fn distinct_labels<'a, I>(labels: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let unique: BTreeSet<&str> = labels.filter(|label| !label.trim().is_empty()).collect();
    sorted_labels(unique)
}

fn sorted_labels(labels: BTreeSet<&str>) -> Vec<String> {
    let mut sorted: Vec<String> = labels.into_iter().map(str::to_string).collect();
    sorted.sort_by(|left, right| locale_cmp(left, right));
    sorted
}
