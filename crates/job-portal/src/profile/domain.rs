use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the job history form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHistoryEntry {
    pub title: String,
    pub company: String,
    pub started_on: NaiveDate,
    #[serde(default)]
    pub ended_on: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

/// One row of the education form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub qualification: String,
    pub started_on: NaiveDate,
    #[serde(default)]
    pub ended_on: Option<NaiveDate>,
}

/// Local editing state for the profile screens before it is saved upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub job_history: Vec<JobHistoryEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

/// Edits dispatched by the profile forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ProfileAction {
    AddJob(JobHistoryEntry),
    UpdateJob { index: usize, entry: JobHistoryEntry },
    RemoveJob { index: usize },
    AddEducation(EducationEntry),
    UpdateEducation { index: usize, entry: EducationEntry },
    RemoveEducation { index: usize },
    AddSkill(String),
    RemoveSkill(String),
    Reset,
}

/// Which list of the draft an edit addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSection {
    JobHistory,
    Education,
    Skills,
}

impl ProfileSection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::JobHistory => "job history",
            Self::Education => "education",
            Self::Skills => "skills",
        }
    }
}
