//! In-memory `JobBoardApi` used by the component tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::JobBoardApi;
use crate::errors::ClientError;
use crate::models::application::{
    ApplicationStatus, CandidateApplication, RecruiterApplication, RecruiterStats,
};
use crate::models::auth::{AccountKind, LoginRequest, LoginResponse, Registration, Role};
use crate::models::company::{Company, CompanyDraft};
use crate::models::job::{JobDetails, JobSummary, NewJob};
use crate::models::profile::{ResumeAttachment, UserProfile};
use crate::models::EntityId;

#[derive(Default)]
pub struct FakeApi {
    pub companies: Vec<Company>,
    /// Artificial latency per search query, for out-of-order completions.
    pub search_delays: HashMap<String, Duration>,
    pub created_company: Option<Company>,
    pub profile: UserProfile,
    pub jobs: Vec<JobSummary>,
    pub applications: Vec<RecruiterApplication>,
    pub my_applications: Vec<CandidateApplication>,
    /// When set, every call fails with this rejection.
    pub reject: Mutex<Option<(u16, Option<String>)>>,
    pub calls: Mutex<Vec<String>>,
    pub patches: Mutex<Vec<(Map<String, Value>, Option<String>)>>,
    pub created_jobs: Mutex<Vec<NewJob>>,
}

pub fn company(id: i64, name: &str) -> Company {
    Company {
        id: EntityId::Number(id),
        name: name.to_string(),
        email: None,
        about: None,
        website: None,
    }
}

pub fn job(id: i64, title: &str, company: &str, location: &str) -> JobSummary {
    JobSummary {
        job_id: EntityId::Number(id),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        date_time: None,
        description: String::new(),
        category: None,
        experience: None,
        status: None,
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_with(&self, status: u16, message: Option<&str>) {
        *self.reject.lock().unwrap() = Some((status, message.map(str::to_string)));
    }

    pub fn accept(&self) {
        *self.reject.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn patches(&self) -> Vec<(Map<String, Value>, Option<String>)> {
        self.patches.lock().unwrap().clone()
    }

    pub fn created_jobs(&self) -> Vec<NewJob> {
        self.created_jobs.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        match self.reject.lock().unwrap().clone() {
            Some((status, message)) => Err(ClientError::Api { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl JobBoardApi for FakeApi {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, ClientError> {
        self.record(format!("login:{}", request.email))?;
        let role = if request.email.starts_with("recruiter") {
            Role::Recruiter
        } else {
            Role::Candidate
        };
        Ok(LoginResponse {
            access_token: "token-123".into(),
            name: Some("Ann".into()),
            role,
        })
    }

    async fn register(
        &self,
        kind: AccountKind,
        registration: &Registration,
    ) -> Result<(), ClientError> {
        self.record(format!("register:{kind:?}:{}", registration.email))
    }

    async fn search_companies(&self, query: &str) -> Result<Vec<Company>, ClientError> {
        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        self.record(format!("search:{query}"))?;
        let needle = query.to_lowercase();
        Ok(self
            .companies
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ClientError> {
        self.record(format!("create_company:{}", draft.company_name))?;
        Ok(self
            .created_company
            .clone()
            .unwrap_or_else(|| company(1000, &draft.company_name)))
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ClientError> {
        self.record("fetch_profile".into())?;
        Ok(self.profile.clone())
    }

    async fn update_profile(
        &self,
        patch: &Map<String, Value>,
        attachment: Option<&ResumeAttachment>,
    ) -> Result<Value, ClientError> {
        self.record("update_profile".into())?;
        self.patches
            .lock()
            .unwrap()
            .push((patch.clone(), attachment.map(|a| a.file_name.clone())));
        Ok(json!({ "status": "ok" }))
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ClientError> {
        self.record("list_jobs".into())?;
        Ok(self.jobs.clone())
    }

    async fn recruiter_jobs(&self) -> Result<Vec<JobSummary>, ClientError> {
        self.record("recruiter_jobs".into())?;
        Ok(self.jobs.clone())
    }

    async fn job_details(&self, job_id: &EntityId) -> Result<JobDetails, ClientError> {
        self.record(format!("job_details:{job_id}"))?;
        let summary = self
            .jobs
            .iter()
            .find(|j| &j.job_id == job_id)
            .ok_or(ClientError::Api {
                status: 404,
                message: Some("Job not found".into()),
            })?;
        Ok(JobDetails {
            id: summary.job_id.clone(),
            title: summary.title.clone(),
            company_name: summary.company.clone(),
            city: summary.location.clone(),
            salary: None,
            experience: summary.experience.clone(),
            created_by_name: None,
            created_at: summary.date_time.clone(),
            category: summary.category.clone(),
            description: summary.description.clone(),
            responsibilities: vec![],
            requirements: vec![],
            skills: vec![],
            status: summary.status.clone(),
        })
    }

    async fn create_job(&self, job: &NewJob) -> Result<(), ClientError> {
        self.record(format!("create_job:{}", job.title))?;
        self.created_jobs.lock().unwrap().push(job.clone());
        Ok(())
    }

    async fn apply(&self, job_id: &EntityId) -> Result<(), ClientError> {
        self.record(format!("apply:{job_id}"))
    }

    async fn apply_from_details(&self, job_id: &EntityId) -> Result<(), ClientError> {
        self.record(format!("apply_from_details:{job_id}"))
    }

    async fn candidate_applications(&self) -> Result<Vec<CandidateApplication>, ClientError> {
        self.record("candidate_applications".into())?;
        Ok(self.my_applications.clone())
    }

    async fn job_applications(
        &self,
        job_id: &EntityId,
    ) -> Result<Vec<RecruiterApplication>, ClientError> {
        self.record(format!("job_applications:{job_id}"))?;
        Ok(self.applications.clone())
    }

    async fn update_application_status(
        &self,
        application_id: &EntityId,
        status: ApplicationStatus,
    ) -> Result<(), ClientError> {
        self.record(format!("update_status:{application_id}:{status}"))
    }

    async fn recruiter_stats(&self) -> Result<RecruiterStats, ClientError> {
        self.record("recruiter_stats".into())?;
        Ok(RecruiterStats {
            jobs_posted: self.jobs.len() as u64,
            applications: self.applications.len() as u64,
            shortlisted: self
                .applications
                .iter()
                .filter(|a| a.application_status == ApplicationStatus::Shortlisted)
                .count() as u64,
        })
    }
}
