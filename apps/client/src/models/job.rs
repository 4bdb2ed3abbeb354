use serde::{Deserialize, Serialize};

use super::EntityId;

/// A job as it appears in listings (`/job/serchjob`, `/job/recruter/jobs`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub job_id: EntityId,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl JobSummary {
    pub fn posted_on(&self) -> Option<String> {
        self.date_time.as_deref().and_then(super::display_date)
    }

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("Active")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Wire payload for `POST /job/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub company: String,
    pub city: String,
    pub skills: Vec<String>,
    pub experience: f64,
    pub salary: String,
}

/// Wire payload for `POST /application/create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest<'a> {
    pub job_id: &'a EntityId,
    pub cover_letter: &'a str,
}
