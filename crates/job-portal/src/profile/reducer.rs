use chrono::NaiveDate;

use super::domain::{EducationEntry, JobHistoryEntry, ProfileAction, ProfileDraft, ProfileSection};
use crate::listings::normalizer::normalize_label;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileEditError {
    #[error("no {} entry at index {index} (have {len})", .section.label())]
    IndexOutOfRange {
        section: ProfileSection,
        index: usize,
        len: usize,
    },
    #[error("{} entry ends on {ended_on} before it starts on {started_on}", .section.label())]
    InvalidDateRange {
        section: ProfileSection,
        started_on: NaiveDate,
        ended_on: NaiveDate,
    },
    #[error("{} field '{field}' must not be blank", .section.label())]
    BlankField {
        section: ProfileSection,
        field: &'static str,
    },
}

impl ProfileDraft {
    /// Applies one edit. The draft is unchanged when the edit is rejected.
    pub fn apply(&mut self, action: ProfileAction) -> Result<(), ProfileEditError> {
        match action {
            ProfileAction::AddJob(entry) => {
                validate_job(&entry)?;
                self.job_history.push(entry);
            }
            ProfileAction::UpdateJob { index, entry } => {
                validate_job(&entry)?;
                let slot = slot_mut(&mut self.job_history, ProfileSection::JobHistory, index)?;
                *slot = entry;
            }
            ProfileAction::RemoveJob { index } => {
                check_index(self.job_history.len(), ProfileSection::JobHistory, index)?;
                self.job_history.remove(index);
            }
            ProfileAction::AddEducation(entry) => {
                validate_education(&entry)?;
                self.education.push(entry);
            }
            ProfileAction::UpdateEducation { index, entry } => {
                validate_education(&entry)?;
                let slot = slot_mut(&mut self.education, ProfileSection::Education, index)?;
                *slot = entry;
            }
            ProfileAction::RemoveEducation { index } => {
                check_index(self.education.len(), ProfileSection::Education, index)?;
                self.education.remove(index);
            }
            ProfileAction::AddSkill(skill) => self.add_skill(&skill)?,
            ProfileAction::RemoveSkill(skill) => {
                let key = normalize_label(&skill);
                self.skills.retain(|existing| normalize_label(existing) != key);
            }
            ProfileAction::Reset => *self = ProfileDraft::default(),
        }

        Ok(())
    }

    /// Applies edits in order, all or nothing.
    pub fn apply_all<I>(&mut self, actions: I) -> Result<(), ProfileEditError>
    where
        I: IntoIterator<Item = ProfileAction>,
    {
        let mut staged = self.clone();
        for action in actions {
            staged.apply(action)?;
        }
        *self = staged;
        Ok(())
    }

    fn add_skill(&mut self, skill: &str) -> Result<(), ProfileEditError> {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            return Err(ProfileEditError::BlankField {
                section: ProfileSection::Skills,
                field: "skill",
            });
        }

        let key = normalize_label(trimmed);
        if !self
            .skills
            .iter()
            .any(|existing| normalize_label(existing) == key)
        {
            self.skills.push(trimmed.to_string());
        }
        Ok(())
    }
}

fn validate_job(entry: &JobHistoryEntry) -> Result<(), ProfileEditError> {
    let section = ProfileSection::JobHistory;
    require(section, "title", &entry.title)?;
    require(section, "company", &entry.company)?;
    check_range(section, entry.started_on, entry.ended_on)
}

fn validate_education(entry: &EducationEntry) -> Result<(), ProfileEditError> {
    let section = ProfileSection::Education;
    require(section, "institution", &entry.institution)?;
    require(section, "qualification", &entry.qualification)?;
    check_range(section, entry.started_on, entry.ended_on)
}

fn require(
    section: ProfileSection,
    field: &'static str,
    value: &str,
) -> Result<(), ProfileEditError> {
    if value.trim().is_empty() {
        Err(ProfileEditError::BlankField { section, field })
    } else {
        Ok(())
    }
}

fn check_range(
    section: ProfileSection,
    started_on: NaiveDate,
    ended_on: Option<NaiveDate>,
) -> Result<(), ProfileEditError> {
    match ended_on {
        Some(ended_on) if ended_on < started_on => Err(ProfileEditError::InvalidDateRange {
            section,
            started_on,
            ended_on,
        }),
        _ => Ok(()),
    }
}

fn check_index(len: usize, section: ProfileSection, index: usize) -> Result<(), ProfileEditError> {
    if index < len {
        Ok(())
    } else {
        Err(ProfileEditError::IndexOutOfRange {
            section,
            index,
            len,
        })
    }
}

fn slot_mut<T>(
    items: &mut [T],
    section: ProfileSection,
    index: usize,
) -> Result<&mut T, ProfileEditError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(ProfileEditError::IndexOutOfRange {
            section,
            index,
            len,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn welder_role() -> JobHistoryEntry {
        JobHistoryEntry {
            title: "Welder".to_string(),
            company: "Harbour Works".to_string(),
            started_on: date(2021, 2, 1),
            ended_on: Some(date(2024, 6, 30)),
            description: String::new(),
        }
    }

    fn tafe() -> EducationEntry {
        EducationEntry {
            institution: "TAFE NSW".to_string(),
            qualification: "Certificate III in Engineering".to_string(),
            started_on: date(2019, 2, 1),
            ended_on: None,
        }
    }

    #[test]
    fn add_update_remove_job_history() {
        let mut draft = ProfileDraft::default();
        draft
            .apply(ProfileAction::AddJob(welder_role()))
            .expect("add job");

        let mut promoted = welder_role();
        promoted.title = "Lead Welder".to_string();
        draft
            .apply(ProfileAction::UpdateJob {
                index: 0,
                entry: promoted,
            })
            .expect("update job");
        assert_eq!(draft.job_history[0].title, "Lead Welder");

        draft
            .apply(ProfileAction::RemoveJob { index: 0 })
            .expect("remove job");
        assert!(draft.job_history.is_empty());
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let mut draft = ProfileDraft::default();
        let error = draft
            .apply(ProfileAction::RemoveEducation { index: 2 })
            .expect_err("nothing to remove");
        assert_eq!(
            error,
            ProfileEditError::IndexOutOfRange {
                section: ProfileSection::Education,
                index: 2,
                len: 0,
            }
        );
        assert_eq!(error.to_string(), "no education entry at index 2 (have 0)");

        let error = draft
            .apply(ProfileAction::UpdateJob {
                index: 0,
                entry: welder_role(),
            })
            .expect_err("nothing to update");
        assert!(matches!(error, ProfileEditError::IndexOutOfRange { .. }));
    }

    #[test]
    fn end_date_before_start_is_rejected() {
        let mut entry = tafe();
        entry.ended_on = Some(date(2018, 12, 1));

        let mut draft = ProfileDraft::default();
        let error = draft
            .apply(ProfileAction::AddEducation(entry))
            .expect_err("invalid range");
        assert!(matches!(error, ProfileEditError::InvalidDateRange { .. }));
        assert!(draft.education.is_empty());
    }

    #[test]
    fn skills_are_trimmed_and_deduplicated_case_insensitively() {
        let mut draft = ProfileDraft::default();
        draft
            .apply_all([
                ProfileAction::AddSkill("  MIG Welding ".to_string()),
                ProfileAction::AddSkill("mig welding".to_string()),
                ProfileAction::AddSkill("Forklift".to_string()),
                ProfileAction::RemoveSkill("FORKLIFT".to_string()),
            ])
            .expect("skills apply");
        assert_eq!(draft.skills, vec!["MIG Welding"]);

        let error = draft
            .apply(ProfileAction::AddSkill("   ".to_string()))
            .expect_err("blank skill");
        assert!(matches!(error, ProfileEditError::BlankField { field: "skill", .. }));
    }

    #[test]
    fn apply_all_is_all_or_nothing() {
        let mut draft = ProfileDraft::default();
        draft
            .apply(ProfileAction::AddEducation(tafe()))
            .expect("seed education");
        let before = draft.clone();

        let mut blank_company = welder_role();
        blank_company.company = " ".to_string();
        let error = draft
            .apply_all([
                ProfileAction::AddSkill("Rigging".to_string()),
                ProfileAction::AddJob(blank_company),
            ])
            .expect_err("second action fails");

        assert_eq!(
            error,
            ProfileEditError::BlankField {
                section: ProfileSection::JobHistory,
                field: "company",
            }
        );
        assert_eq!(draft, before);
    }

    #[test]
    fn reset_clears_the_draft() {
        let mut draft = ProfileDraft::default();
        draft
            .apply_all([
                ProfileAction::AddJob(welder_role()),
                ProfileAction::AddSkill("Rigging".to_string()),
                ProfileAction::Reset,
            ])
            .expect("actions apply");
        assert_eq!(draft, ProfileDraft::default());
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let actions: Vec<ProfileAction> = serde_json::from_str(
            r#"[
                {"type": "add_skill", "payload": "Rigging"},
                {"type": "remove_job", "payload": {"index": 1}},
                {"type": "reset"}
            ]"#,
        )
        .expect("actions parse");

        assert_eq!(
            actions,
            vec![
                ProfileAction::AddSkill("Rigging".to_string()),
                ProfileAction::RemoveJob { index: 1 },
                ProfileAction::Reset,
            ]
        );
    }
}
