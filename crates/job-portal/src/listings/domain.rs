use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::normalizer::{normalize_label, parse_listing_date};

/// A job posting as pushed by the job collection source.
///
/// Upstream documents are loosely typed: labels may be missing, `null`, or
/// not strings at all. Those collapse to empty strings here so the filter
/// engine never has to reason about absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient_label")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub company: String,
    #[serde(
        rename = "category",
        alias = "categories",
        default,
        deserialize_with = "one_or_many_labels"
    )]
    pub categories: Vec<String>,
    #[serde(alias = "jobType", default, deserialize_with = "lenient_label")]
    pub job_type: String,
    #[serde(alias = "workMode", default, deserialize_with = "lenient_label")]
    pub work_mode: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub suburb: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub city: String,
    #[serde(
        alias = "isActive",
        default = "active_by_default",
        deserialize_with = "lenient_active_flag"
    )]
    pub is_active: bool,
    #[serde(
        alias = "logoUri",
        alias = "logo",
        default,
        deserialize_with = "optional_label"
    )]
    pub logo_uri: Option<String>,
    #[serde(alias = "items", default, deserialize_with = "many_labels")]
    pub bullets: Vec<String>,
    #[serde(alias = "postedOn", default, deserialize_with = "lenient_date")]
    pub posted_on: Option<NaiveDate>,
}

impl JobRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: String::new(),
            categories: Vec::new(),
            job_type: String::new(),
            work_mode: String::new(),
            suburb: String::new(),
            city: String::new(),
            is_active: true,
            logo_uri: None,
            bullets: Vec::new(),
            posted_on: None,
        }
    }

    pub fn category_labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }
}

/// A top-level category and its flat list of subcategory labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_label")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub name: String,
    #[serde(alias = "subCategories", default, deserialize_with = "many_labels")]
    pub subcategories: Vec<String>,
}

impl Category {
    pub fn new<I, S>(name: impl Into<String>, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        Self {
            id: normalize_label(&name),
            name,
            subcategories: subcategories.into_iter().map(Into::into).collect(),
        }
    }
}

/// City selection from the filter popup. `All` is the "no constraint" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum CitySelection {
    #[default]
    All,
    Named(String),
}

impl CitySelection {
    pub const ALL_LABEL: &'static str = "All";

    /// Blank input and any casing of `All` select every city.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL_LABEL) {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Named(city) => city,
        }
    }
}

impl From<Option<String>> for CitySelection {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map_or(Self::All, Self::parse)
    }
}

impl From<CitySelection> for String {
    fn from(value: CitySelection) -> Self {
        value.as_str().to_string()
    }
}

/// Snapshot of the user's filter popup selections.
///
/// Set members are stored in canonical (trimmed, lowercased) form when they
/// come through the toggle methods. Criteria deserialized from elsewhere may
/// hold raw labels; matching normalizes both sides regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    #[serde(alias = "selectedCategories")]
    pub categories: BTreeSet<String>,
    #[serde(alias = "selectedCity")]
    pub city: CitySelection,
    #[serde(alias = "jobTypes")]
    pub job_types: BTreeSet<String>,
    #[serde(alias = "workModes")]
    pub work_modes: BTreeSet<String>,
    pub suburbs: BTreeSet<String>,
    #[serde(alias = "pastOnly")]
    pub past_only: bool,
}

impl FilterCriteria {
    /// Returns `true` when the label is selected after the toggle.
    pub fn toggle_category(&mut self, label: &str) -> bool {
        toggle(&mut self.categories, label)
    }

    pub fn toggle_job_type(&mut self, label: &str) -> bool {
        toggle(&mut self.job_types, label)
    }

    pub fn toggle_work_mode(&mut self, label: &str) -> bool {
        toggle(&mut self.work_modes, label)
    }

    pub fn toggle_suburb(&mut self, label: &str) -> bool {
        toggle(&mut self.suburbs, label)
    }

    pub fn select_city(&mut self, city: &str) {
        self.city = CitySelection::parse(city);
    }

    pub fn set_past_only(&mut self, past_only: bool) {
        self.past_only = past_only;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no selection narrows the listing.
    pub fn is_unconstrained(&self) -> bool {
        self.categories.is_empty()
            && self.city == CitySelection::All
            && self.job_types.is_empty()
            && self.work_modes.is_empty()
            && self.suburbs.is_empty()
            && !self.past_only
    }
}

fn toggle(set: &mut BTreeSet<String>, label: &str) -> bool {
    let key = normalize_label(label);
    if key.is_empty() {
        return false;
    }

    if set.remove(&key) {
        false
    } else {
        set.insert(key);
        true
    }
}

fn active_by_default() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Other(IgnoredAny),
}

impl RawLabel {
    fn into_label(self) -> String {
        match self {
            RawLabel::Text(text) => text,
            RawLabel::Other(_) => String::new(),
        }
    }
}

fn lenient_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawLabel::deserialize(deserializer).map(RawLabel::into_label)
}

fn optional_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = lenient_label(deserializer)?;
    Ok(Some(label).filter(|label| !label.trim().is_empty()))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = lenient_label(deserializer)?;
    Ok(parse_listing_date(&label))
}

fn many_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawList {
        Many(Vec<RawLabel>),
        Other(IgnoredAny),
    }

    Ok(match RawList::deserialize(deserializer)? {
        RawList::Many(items) => collect_labels(items),
        RawList::Other(_) => Vec::new(),
    })
}

fn one_or_many_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCategories {
        One(String),
        Many(Vec<RawLabel>),
        Other(IgnoredAny),
    }

    Ok(match RawCategories::deserialize(deserializer)? {
        RawCategories::One(label) if label.trim().is_empty() => Vec::new(),
        RawCategories::One(label) => vec![label],
        RawCategories::Many(items) => collect_labels(items),
        RawCategories::Other(_) => Vec::new(),
    })
}

fn collect_labels(items: Vec<RawLabel>) -> Vec<String> {
    items
        .into_iter()
        .map(RawLabel::into_label)
        .filter(|label| !label.trim().is_empty())
        .collect()
}

// Only an explicit `false` marks a listing as past.
fn lenient_active_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Flag(bool),
        Other(IgnoredAny),
    }

    Ok(!matches!(
        RawFlag::deserialize(deserializer)?,
        RawFlag::Flag(false)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_record_tolerates_missing_and_malformed_fields() {
        let record: JobRecord = serde_json::from_value(json!({
            "id": "job-1",
            "title": "Site Welder",
            "city": null,
            "suburb": 42,
            "jobType": "Full-time",
            "category": "Welding"
        }))
        .expect("record deserializes");

        assert_eq!(record.city, "");
        assert_eq!(record.suburb, "");
        assert_eq!(record.job_type, "Full-time");
        assert_eq!(record.work_mode, "");
        assert_eq!(record.categories, vec!["Welding".to_string()]);
        assert!(record.is_active);
    }

    #[test]
    fn display_fields_fall_back_when_malformed() {
        let record: JobRecord = serde_json::from_value(json!({
            "id": "job-3",
            "logo": 5,
            "items": null,
            "postedOn": "14/03/2025"
        }))
        .expect("record deserializes");

        assert_eq!(record.logo_uri, None);
        assert!(record.bullets.is_empty());
        assert_eq!(record.posted_on, None);

        let record: JobRecord = serde_json::from_value(json!({
            "id": "job-4",
            "logoUri": "  ",
            "items": [null, "Own tools", 3],
            "postedOn": "2025-03-14T09:30:00+10:00"
        }))
        .expect("record deserializes");

        assert_eq!(record.logo_uri, None);
        assert_eq!(record.bullets, vec!["Own tools"]);
        assert_eq!(record.posted_on, NaiveDate::from_ymd_opt(2025, 3, 13));
    }

    #[test]
    fn display_fields_keep_well_formed_values() {
        let record: JobRecord = serde_json::from_value(json!({
            "id": "job-5",
            "logo_uri": "https://cdn.example.com/acme.png",
            "bullets": ["Weekend rates"],
            "posted_on": "2025-03-14"
        }))
        .expect("record deserializes");

        assert_eq!(
            record.logo_uri.as_deref(),
            Some("https://cdn.example.com/acme.png")
        );
        assert_eq!(record.bullets, vec!["Weekend rates"]);
        assert_eq!(record.posted_on, NaiveDate::from_ymd_opt(2025, 3, 14));
    }

    #[test]
    fn only_explicit_false_marks_record_inactive() {
        let inactive: JobRecord =
            serde_json::from_value(json!({ "id": "a", "isActive": false })).expect("inactive");
        let null_flag: JobRecord =
            serde_json::from_value(json!({ "id": "b", "is_active": null })).expect("null flag");
        let text_flag: JobRecord =
            serde_json::from_value(json!({ "id": "c", "is_active": "false" })).expect("text flag");

        assert!(!inactive.is_active);
        assert!(null_flag.is_active);
        assert!(text_flag.is_active);
    }

    #[test]
    fn category_field_accepts_lists_and_skips_blank_entries() {
        let record: JobRecord = serde_json::from_value(json!({
            "id": "job-2",
            "categories": ["Trades", " ", null, "Plumbing"]
        }))
        .expect("record deserializes");

        assert_eq!(record.categories, vec!["Trades", "Plumbing"]);
    }

    #[test]
    fn category_accepts_camel_case_subcategories() {
        let category: Category = serde_json::from_value(json!({
            "id": "trades",
            "name": "Trades",
            "subCategories": ["Welding", "Plumbing"]
        }))
        .expect("category deserializes");

        assert_eq!(category.subcategories, vec!["Welding", "Plumbing"]);
    }

    #[test]
    fn city_selection_round_trips_sentinel() {
        assert_eq!(CitySelection::parse(" all "), CitySelection::All);
        assert_eq!(CitySelection::parse(""), CitySelection::All);
        assert_eq!(
            CitySelection::parse(" Sydney "),
            CitySelection::Named("Sydney".to_string())
        );

        let criteria: FilterCriteria =
            serde_json::from_value(json!({ "city": "Perth", "pastOnly": true }))
                .expect("criteria deserializes");
        assert_eq!(criteria.city, CitySelection::Named("Perth".to_string()));
        assert!(criteria.past_only);

        let null_city: FilterCriteria =
            serde_json::from_value(json!({ "city": null })).expect("null city deserializes");
        assert_eq!(null_city.city, CitySelection::All);

        let encoded = serde_json::to_value(FilterCriteria::default()).expect("serializes");
        assert_eq!(encoded["city"], "All");
    }

    #[test]
    fn toggles_store_canonical_keys() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.toggle_job_type("  Full-Time "));
        assert!(criteria.job_types.contains("full-time"));
        assert!(!criteria.toggle_job_type("full-time"));
        assert!(criteria.job_types.is_empty());
        assert!(!criteria.toggle_suburb("   "));
        assert!(criteria.suburbs.is_empty());
    }

    #[test]
    fn reset_clears_every_selection() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_category("Trades");
        criteria.toggle_work_mode("Remote");
        criteria.select_city("Sydney");
        criteria.set_past_only(true);
        assert!(!criteria.is_unconstrained());

        criteria.reset();
        assert!(criteria.is_unconstrained());
        assert_eq!(criteria, FilterCriteria::default());
    }
}
