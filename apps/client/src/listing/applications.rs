use tracing::{info, warn};

use crate::api_client::JobBoardApi;
use crate::errors::ClientError;
use crate::models::application::{
    ApplicationStatus, CandidateApplication, RecruiterApplication, RecruiterStats,
};
use crate::models::job::JobSummary;
use crate::models::EntityId;
use crate::notice::Notice;

/// Applications received for one job, as the recruiter reviews them.
#[derive(Debug, Clone)]
pub struct ApplicationBoard {
    job_id: EntityId,
    applications: Vec<RecruiterApplication>,
    search: String,
    /// `None` shows every status.
    status: Option<ApplicationStatus>,
}

impl ApplicationBoard {
    pub async fn load(api: &dyn JobBoardApi, job_id: EntityId) -> Result<Self, ClientError> {
        let applications = api.job_applications(&job_id).await?;
        info!("Loaded {} application(s) for job {job_id}", applications.len());
        Ok(Self {
            job_id,
            applications,
            search: String::new(),
            status: None,
        })
    }

    pub fn job_id(&self) -> &EntityId {
        &self.job_id
    }

    pub fn applications(&self) -> &[RecruiterApplication] {
        &self.applications
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn set_status_filter(&mut self, status: Option<ApplicationStatus>) {
        self.status = status;
    }

    /// Rows whose candidate name or email contains the search term
    /// (case-insensitive) and whose status passes the filter.
    pub fn visible(&self) -> Vec<&RecruiterApplication> {
        let needle = self.search.to_lowercase();
        self.applications
            .iter()
            .filter(|app| {
                let name = app.user_name.as_deref().unwrap_or("").to_lowercase();
                let email = app.email.as_deref().unwrap_or("").to_lowercase();
                name.contains(&needle) || email.contains(&needle)
            })
            .filter(|app| self.status.map_or(true, |s| app.application_status == s))
            .collect()
    }

    /// Sends the new status; the local row changes only once the server
    /// has accepted it.
    pub async fn update_status(
        &mut self,
        api: &dyn JobBoardApi,
        application_id: &EntityId,
        status: ApplicationStatus,
    ) -> Result<Notice, ClientError> {
        api.update_application_status(application_id, status)
            .await
            .map_err(|e| {
                warn!("Status update for application {application_id} failed: {e}");
                e
            })?;

        if let Some(row) = self.applications.iter_mut().find(|a| &a.id == application_id) {
            row.application_status = status;
        }
        info!("Application {application_id} is now {status}");
        Ok(Notice::success(
            "Status Updated",
            "Application status has been updated successfully.",
        ))
    }
}

/// The candidate's own applications.
#[derive(Debug, Clone, Default)]
pub struct CandidateApplications {
    items: Vec<CandidateApplication>,
}

impl CandidateApplications {
    pub async fn load(api: &dyn JobBoardApi) -> Result<Self, ClientError> {
        let items = api.candidate_applications().await?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[CandidateApplication] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Applications still awaiting a decision.
    pub fn pending(&self) -> usize {
        self.items.iter().filter(|a| a.status.is_pending()).count()
    }

    pub fn applied_on(application: &CandidateApplication) -> Option<String> {
        application
            .applied_date
            .as_deref()
            .and_then(crate::models::display_date)
    }
}

/// The recruiter dashboard: posted jobs plus headline numbers.
#[derive(Debug, Clone)]
pub struct RecruiterOverview {
    pub jobs: Vec<JobSummary>,
    pub stats: RecruiterStats,
}

impl RecruiterOverview {
    pub async fn load(api: &dyn JobBoardApi) -> Result<Self, ClientError> {
        let jobs = api.recruiter_jobs().await?;
        let stats = api.recruiter_stats().await?;
        Ok(Self { jobs, stats })
    }

    pub fn active_jobs(&self) -> usize {
        self.jobs.iter().filter(|j| j.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::fake::{job, FakeApi};

    fn application(id: i64, name: &str, email: &str, status: ApplicationStatus) -> RecruiterApplication {
        RecruiterApplication {
            id: EntityId::Number(id),
            user_name: Some(name.into()),
            user_id: None,
            email: Some(email.into()),
            score: None,
            job_name: Some("Rust Engineer".into()),
            applied_at: None,
            application_status: status,
            resume_link: None,
        }
    }

    fn api() -> FakeApi {
        let mut anonymous = application(3, "", "", ApplicationStatus::Applied);
        anonymous.user_name = None;
        anonymous.email = None;
        FakeApi {
            applications: vec![
                application(1, "Ann Lee", "ann@example.com", ApplicationStatus::Applied),
                application(2, "Bob Stone", "bob@corp.io", ApplicationStatus::Shortlisted),
                anonymous,
            ],
            ..FakeApi::new()
        }
    }

    fn visible_ids(board: &ApplicationBoard) -> Vec<String> {
        board.visible().iter().map(|a| a.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_search_and_status_filter() {
        let api = api();
        let mut board = ApplicationBoard::load(&api, EntityId::Number(5)).await.unwrap();
        assert_eq!(visible_ids(&board), vec!["1", "2", "3"]);

        board.set_search("CORP");
        assert_eq!(visible_ids(&board), vec!["2"]);

        board.set_search("");
        board.set_status_filter(Some(ApplicationStatus::Applied));
        assert_eq!(visible_ids(&board), vec!["1", "3"]);
        assert_eq!(api.calls(), vec!["job_applications:5"]);
    }

    #[tokio::test]
    async fn test_status_change_applied_after_success() {
        let api = api();
        let mut board = ApplicationBoard::load(&api, EntityId::Number(5)).await.unwrap();
        let id = EntityId::Number(1);
        let notice = board
            .update_status(&api, &id, ApplicationStatus::Interviewing)
            .await
            .unwrap();
        assert_eq!(notice.title, "Status Updated");
        assert_eq!(
            board.applications()[0].application_status,
            ApplicationStatus::Interviewing
        );
        assert_eq!(api.calls_to("update_status"), vec!["update_status:1:Interviewing"]);
    }

    #[tokio::test]
    async fn test_failed_status_change_leaves_row() {
        let api = api();
        let mut board = ApplicationBoard::load(&api, EntityId::Number(5)).await.unwrap();
        api.reject_with(403, None);
        let id = EntityId::Number(2);
        assert!(board
            .update_status(&api, &id, ApplicationStatus::Rejected)
            .await
            .is_err());
        assert_eq!(
            board.applications()[1].application_status,
            ApplicationStatus::Shortlisted
        );
    }

    #[tokio::test]
    async fn test_candidate_counts() {
        let row = |id: i64, status| CandidateApplication {
            id: EntityId::Number(id),
            job_title: "SRE".into(),
            company: "Globex".into(),
            status,
            applied_date: Some("2024-02-01".into()),
            location: "Berlin".into(),
        };
        let api = FakeApi {
            my_applications: vec![
                row(1, ApplicationStatus::Applied),
                row(2, ApplicationStatus::Rejected),
                row(3, ApplicationStatus::Interviewing),
            ],
            ..FakeApi::new()
        };
        let mine = CandidateApplications::load(&api).await.unwrap();
        assert_eq!(mine.total(), 3);
        assert_eq!(mine.pending(), 2);
        assert_eq!(
            CandidateApplications::applied_on(&mine.items()[0]).as_deref(),
            Some("01/02/2024")
        );
    }

    #[tokio::test]
    async fn test_recruiter_overview() {
        let mut live = job(1, "Rust Engineer", "Acme", "Remote");
        live.status = Some("Active".into());
        let api = FakeApi {
            jobs: vec![live, job(2, "Designer", "Acme", "Seattle")],
            ..api()
        };
        let overview = RecruiterOverview::load(&api).await.unwrap();
        assert_eq!(overview.jobs.len(), 2);
        assert_eq!(overview.active_jobs(), 1);
        assert_eq!(overview.stats.applications, 3);
        assert_eq!(overview.stats.shortlisted, 1);
    }
}
