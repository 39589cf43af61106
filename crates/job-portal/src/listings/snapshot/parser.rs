use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::listings::domain::JobRecord;
use crate::listings::normalizer::parse_listing_date;

const LIST_SEPARATOR: char = '|';

pub(crate) fn parse_job_rows<R: Read>(reader: R) -> Result<Vec<JobRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<JobRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct JobRow {
    id: String,
    title: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    job_type: String,
    #[serde(default)]
    work_mode: String,
    #[serde(default)]
    suburb: String,
    #[serde(default)]
    city: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_active: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    posted_on: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    logo_uri: Option<String>,
    #[serde(default)]
    bullets: String,
}

impl JobRow {
    fn into_record(self) -> JobRecord {
        let is_active = self.is_active.as_deref().map_or(true, parse_active);
        let posted_on = self.posted_on.as_deref().and_then(parse_listing_date);

        JobRecord {
            id: self.id,
            title: self.title,
            company: self.company,
            categories: split_list(&self.category),
            job_type: self.job_type,
            work_mode: self.work_mode,
            suburb: self.suburb,
            city: self.city,
            is_active,
            logo_uri: self.logo_uri,
            bullets: split_list(&self.bullets),
            posted_on,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// Anything but an explicit negative keeps the listing active.
fn parse_active(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "no" | "0" | "inactive"
    )
}
