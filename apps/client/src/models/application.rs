use std::fmt;

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Application lifecycle status. The recruiter endpoints speak
/// `SCREAMING_CASE`; candidate views have been seen with title case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[serde(alias = "Applied")]
    Applied,
    #[serde(alias = "Shortlisted")]
    Shortlisted,
    #[serde(alias = "Rejected")]
    Rejected,
    #[serde(alias = "Interviewing")]
    Interviewing,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Rejected,
        ApplicationStatus::Interviewing,
    ];

    /// Still waiting on the recruiter.
    pub fn is_pending(self) -> bool {
        matches!(self, ApplicationStatus::Applied | ApplicationStatus::Interviewing)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Interviewing => "Interviewing",
        };
        f.write_str(s)
    }
}

/// A row in the candidate's "My Applications" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplication {
    pub id: EntityId,
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub applied_date: Option<String>,
    #[serde(default)]
    pub location: String,
}

/// A row in the recruiter's per-job application board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterApplication {
    pub id: EntityId,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub job_name: Option<String>,
    #[serde(default)]
    pub applied_at: Option<String>,
    pub application_status: ApplicationStatus,
    #[serde(default)]
    pub resume_link: Option<String>,
}

/// Wire payload for `PATCH /application/recruiter/update`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate<'a> {
    pub application_id: &'a EntityId,
    pub application_status: ApplicationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterStats {
    #[serde(default)]
    pub jobs_posted: u64,
    #[serde(default)]
    pub applications: u64,
    #[serde(default)]
    pub shortlisted: u64,
}
