//! Local editing state for the profile forms (job history, education, skills).

pub mod domain;
pub mod reducer;
pub mod router;

pub use domain::{EducationEntry, JobHistoryEntry, ProfileAction, ProfileDraft, ProfileSection};
pub use reducer::ProfileEditError;
pub use router::profile_router;
