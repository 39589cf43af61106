mod parser;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use super::domain::{Category, JobRecord};

#[derive(Debug)]
pub enum SnapshotImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for SnapshotImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotImportError::Io(err) => write!(f, "failed to read snapshot: {}", err),
            SnapshotImportError::Csv(err) => write!(f, "invalid job CSV data: {}", err),
            SnapshotImportError::Json(err) => write!(f, "invalid snapshot JSON: {}", err),
        }
    }
}

impl std::error::Error for SnapshotImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotImportError::Io(err) => Some(err),
            SnapshotImportError::Csv(err) => Some(err),
            SnapshotImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SnapshotImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SnapshotImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for SnapshotImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads full job and category snapshots exported from the document store.
pub struct SnapshotImporter;

impl SnapshotImporter {
    /// `.csv` files are read as tabular exports, anything else as a JSON array.
    pub fn jobs_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<JobRecord>, SnapshotImportError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let jobs = if is_csv {
            Self::jobs_from_csv_reader(reader)?
        } else {
            Self::jobs_from_json_reader(reader)?
        };

        debug!(path = %path.display(), jobs = jobs.len(), "loaded job snapshot");
        Ok(jobs)
    }

    pub fn jobs_from_json_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<JobRecord>, SnapshotImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn jobs_from_csv_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<JobRecord>, SnapshotImportError> {
        Ok(parser::parse_job_rows(reader)?)
    }

    pub fn categories_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Category>, SnapshotImportError> {
        let path = path.as_ref();
        let categories = Self::categories_from_json_reader(BufReader::new(File::open(path)?))?;
        debug!(
            path = %path.display(),
            categories = categories.len(),
            "loaded category snapshot"
        );
        Ok(categories)
    }

    pub fn categories_from_json_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<Category>, SnapshotImportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
