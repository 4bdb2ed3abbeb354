//! API client: the single point of entry for all job-board REST calls.
//!
//! Every component talks to the backend through the `JobBoardApi` trait.
//! `HttpApiClient` is the reqwest-backed implementation; tests substitute a fake.
//!
//! Requests are attempted exactly once. A failed call is reported to the
//! caller, which decides whether the user should be asked to try again.

use std::sync::Arc;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ClientError;
use crate::models::application::{
    ApplicationStatus, CandidateApplication, RecruiterApplication, RecruiterStats, StatusUpdate,
};
use crate::models::auth::{AccountKind, LoginRequest, LoginResponse, Registration};
use crate::models::company::{Company, CompanyDraft, NewCompany};
use crate::models::job::{ApplyRequest, JobDetails, JobSummary, NewJob};
use crate::models::profile::{ResumeAttachment, UserProfile};
use crate::models::EntityId;
use crate::session::CredentialProvider;

/// The remote collaborator contract. Implement this to swap transports
/// without touching any component.
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, ClientError>;

    async fn register(&self, kind: AccountKind, registration: &Registration)
        -> Result<(), ClientError>;

    async fn search_companies(&self, query: &str) -> Result<Vec<Company>, ClientError>;

    async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ClientError>;

    async fn fetch_profile(&self) -> Result<UserProfile, ClientError>;

    /// Sends only the changed fields. `attachment`, when present, rides along
    /// as a multipart `resume` part.
    async fn update_profile(
        &self,
        patch: &Map<String, Value>,
        attachment: Option<&ResumeAttachment>,
    ) -> Result<Value, ClientError>;

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ClientError>;

    async fn recruiter_jobs(&self) -> Result<Vec<JobSummary>, ClientError>;

    async fn job_details(&self, job_id: &EntityId) -> Result<JobDetails, ClientError>;

    async fn create_job(&self, job: &NewJob) -> Result<(), ClientError>;

    async fn apply(&self, job_id: &EntityId) -> Result<(), ClientError>;

    async fn apply_from_details(&self, job_id: &EntityId) -> Result<(), ClientError>;

    async fn candidate_applications(&self) -> Result<Vec<CandidateApplication>, ClientError>;

    async fn job_applications(
        &self,
        job_id: &EntityId,
    ) -> Result<Vec<RecruiterApplication>, ClientError>;

    async fn update_application_status(
        &self,
        application_id: &EntityId,
        status: ApplicationStatus,
    ) -> Result<(), ClientError>;

    async fn recruiter_stats(&self) -> Result<RecruiterStats, ClientError>;
}

/// reqwest-backed `JobBoardApi`. The credential provider is consulted on
/// every request, so signing in or out takes effect immediately.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpApiClient {
    pub fn new(config: &Config, credentials: Arc<dyn CredentialProvider>) -> anyhow::Result<Self> {
        let base = Url::parse(&config.api_base_url)
            .with_context(|| format!("API_BASE_URL '{}' is not a valid URL", config.api_base_url))?;
        if base.cannot_be_a_base() {
            bail!("API_BASE_URL '{}' cannot be used as a base URL", config.api_base_url);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.endpoint(segments);
        debug!("GET {url}");
        let response = self.authorized(self.client.get(url)).send().await?;
        read_json(response).await
    }

    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(method, segments, body).await?;
        read_json(response).await
    }

    async fn send_discard<B>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: &B,
    ) -> Result<(), ClientError>
    where
        B: serde::Serialize + ?Sized + Sync,
    {
        let response = self.send(method, segments, body).await?;
        ensure_success(response).await.map(|_| ())
    }

    async fn send<B>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: &B,
    ) -> Result<Response, ClientError>
    where
        B: serde::Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(segments);
        debug!("{method} {url}");
        let request = self.client.request(method, url).json(body);
        Ok(self.authorized(request).send().await?)
    }
}

/// Returns the body of a successful response, or the server's rejection.
async fn ensure_success(response: Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        warn!("API returned {}: {}", status, body);
        return Err(ClientError::from_response_body(status.as_u16(), &body));
    }
    Ok(body)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = ensure_success(response).await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl JobBoardApi for HttpApiClient {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, ClientError> {
        self.send_json(reqwest::Method::POST, &["auth", "v1", "login"], request)
            .await
    }

    async fn register(
        &self,
        kind: AccountKind,
        registration: &Registration,
    ) -> Result<(), ClientError> {
        let path: &[&str] = match kind {
            AccountKind::JobSeeker => &["auth", "v1", "candidate", "register"],
            AccountKind::Recruiter => &["auth", "v1", "recruiter", "registerExistingcompany"],
        };
        self.send_discard(reqwest::Method::POST, path, registration)
            .await
    }

    async fn search_companies(&self, query: &str) -> Result<Vec<Company>, ClientError> {
        // The endpoint answers `null` rather than `[]` when nothing matches.
        let found: Option<Vec<Company>> = self
            .get_json(&["api", "company", "search", query])
            .await?;
        Ok(found.unwrap_or_default())
    }

    async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ClientError> {
        self.send_json(
            reqwest::Method::POST,
            &["api", "users", "addCompany"],
            &NewCompany::from(draft),
        )
        .await
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ClientError> {
        self.get_json(&["api", "users", "me", "profile"]).await
    }

    async fn update_profile(
        &self,
        patch: &Map<String, Value>,
        attachment: Option<&ResumeAttachment>,
    ) -> Result<Value, ClientError> {
        let segments = ["api", "users", "me", "profile", "update"];
        let Some(attachment) = attachment else {
            return self
                .send_json(reqwest::Method::PATCH, &segments, patch)
                .await;
        };

        let form = Form::new()
            .part(
                "profile",
                Part::text(serde_json::to_string(patch)?).mime_str("application/json")?,
            )
            .part(
                "resume",
                Part::stream(reqwest::Body::from(attachment.content.clone()))
                    .file_name(attachment.file_name.clone()),
            );
        let url = self.endpoint(&segments);
        debug!("PATCH {url} (multipart, resume '{}')", attachment.file_name);
        let response = self
            .authorized(self.client.patch(url).multipart(form))
            .send()
            .await?;
        let body = ensure_success(response).await?;
        // Some deployments answer the multipart variant with an empty body.
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ClientError> {
        self.get_json(&["job", "serchjob"]).await
    }

    async fn recruiter_jobs(&self) -> Result<Vec<JobSummary>, ClientError> {
        self.get_json(&["job", "recruter", "jobs"]).await
    }

    async fn job_details(&self, job_id: &EntityId) -> Result<JobDetails, ClientError> {
        let id = job_id.to_string();
        self.get_json(&["job", &id]).await
    }

    async fn create_job(&self, job: &NewJob) -> Result<(), ClientError> {
        self.send_discard(reqwest::Method::POST, &["job", "create"], job)
            .await
    }

    async fn apply(&self, job_id: &EntityId) -> Result<(), ClientError> {
        let request = ApplyRequest {
            job_id,
            cover_letter: "",
        };
        self.send_discard(reqwest::Method::POST, &["application", "create"], &request)
            .await
    }

    async fn apply_from_details(&self, job_id: &EntityId) -> Result<(), ClientError> {
        let id = job_id.to_string();
        self.send_discard(
            reqwest::Method::POST,
            &["application", "candidate", "apply", &id],
            &Map::new(),
        )
        .await
    }

    async fn candidate_applications(&self) -> Result<Vec<CandidateApplication>, ClientError> {
        let raw: Value = self
            .get_json(&["application", "candidate", "view"])
            .await?;
        if !raw.is_array() {
            warn!("Unexpected applications payload: {raw}");
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(raw)?)
    }

    async fn job_applications(
        &self,
        job_id: &EntityId,
    ) -> Result<Vec<RecruiterApplication>, ClientError> {
        let id = job_id.to_string();
        self.get_json(&["application", "recruiter", "view", &id])
            .await
    }

    async fn update_application_status(
        &self,
        application_id: &EntityId,
        status: ApplicationStatus,
    ) -> Result<(), ClientError> {
        let update = StatusUpdate {
            application_id,
            application_status: status,
        };
        self.send_discard(
            reqwest::Method::PATCH,
            &["application", "recruiter", "update"],
            &update,
        )
        .await
    }

    async fn recruiter_stats(&self) -> Result<RecruiterStats, ClientError> {
        self.get_json(&["api", "users", "stats"]).await
    }
}

#[cfg(test)]
pub(crate) mod fake;
