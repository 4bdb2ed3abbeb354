use tracing::{info, warn};

use crate::api_client::JobBoardApi;
use crate::errors::ClientError;
use crate::models::job::{JobDetails, JobSummary};
use crate::models::EntityId;
use crate::notice::Notice;
use crate::session::{CredentialProvider, SessionStore};

pub const APPLY_FAILED: &str = "Something went wrong.";

/// One job in a listing, with the candidate's actions on it.
#[derive(Debug, Clone)]
pub struct JobCard {
    job: JobSummary,
    bookmarked: bool,
}

impl JobCard {
    pub fn new(job: JobSummary) -> Self {
        Self {
            job,
            bookmarked: false,
        }
    }

    pub fn job(&self) -> &JobSummary {
        &self.job
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    /// Flips the bookmark. Local only; nothing is sent.
    pub fn toggle_bookmark(&mut self) -> Notice {
        self.bookmarked = !self.bookmarked;
        let title = if self.bookmarked {
            "Added to bookmarks"
        } else {
            "Removed from bookmarks"
        };
        Notice::info(title, format!("{} at {}", self.job.title, self.job.company))
    }

    /// Applies with an empty cover letter. Refused locally when signed out,
    /// or when the session says the profile still needs updating.
    pub async fn apply(
        &self,
        api: &dyn JobBoardApi,
        session: &SessionStore,
    ) -> Result<Notice, ClientError> {
        if session.bearer_token().is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        if session.needs_profile_update() {
            return Err(ClientError::ProfileIncomplete);
        }

        api.apply(&self.job.job_id).await.map_err(|e| {
            warn!("Application for job {} failed: {e}", self.job.job_id);
            e
        })?;
        info!("Applied to job {}", self.job.job_id);
        Ok(Notice::success(
            "Application Submitted",
            format!(
                "You have successfully applied for {} at {}",
                self.job.title, self.job.company
            ),
        ))
    }
}

/// The full job page.
#[derive(Debug, Clone)]
pub struct JobDetailsView {
    details: JobDetails,
}

impl JobDetailsView {
    pub async fn load(api: &dyn JobBoardApi, job_id: &EntityId) -> Result<Self, ClientError> {
        let details = api.job_details(job_id).await?;
        Ok(Self { details })
    }

    pub fn details(&self) -> &JobDetails {
        &self.details
    }

    pub fn posted_on(&self) -> Option<String> {
        self.details
            .created_at
            .as_deref()
            .and_then(crate::models::display_date)
    }

    /// The apply button is only offered on active postings.
    pub fn accepts_applications(&self) -> bool {
        self.details.status.as_deref() == Some("Active")
    }

    pub async fn apply(
        &self,
        api: &dyn JobBoardApi,
        session: &SessionStore,
    ) -> Result<Notice, ClientError> {
        if session.bearer_token().is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        if !self.accepts_applications() {
            return Err(ClientError::PostingClosed);
        }
        api.apply_from_details(&self.details.id).await.map_err(|e| {
            warn!("Direct application for job {} failed: {e}", self.details.id);
            e
        })?;
        Ok(Notice::success(
            "Application Submitted!",
            format!(
                "Your application for {} has been submitted successfully.",
                self.details.title
            ),
        ))
    }
}
