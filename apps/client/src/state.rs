use std::sync::Arc;

use anyhow::Result;

use crate::api_client::{HttpApiClient, JobBoardApi};
use crate::config::Config;
use crate::listing::JobSearch;
use crate::lookup::CompanyPicker;
use crate::models::job::JobSummary;
use crate::session::SessionStore;

/// Shared client state handed to every screen: the configuration, the API
/// transport and the session it reads credentials from.
#[derive(Clone)]
pub struct ClientState {
    pub config: Config,
    pub api: Arc<dyn JobBoardApi>,
    pub session: Arc<SessionStore>,
}

impl ClientState {
    /// Wires the reqwest transport to a fresh, signed-out session.
    pub fn connect(config: Config) -> Result<Self> {
        let session = Arc::new(SessionStore::new());
        let api = HttpApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            api: Arc::new(api),
            session,
        })
    }

    pub fn with_api(config: Config, api: Arc<dyn JobBoardApi>, session: Arc<SessionStore>) -> Self {
        Self {
            config,
            api,
            session,
        }
    }

    /// A company picker using the configured quiet period.
    pub fn company_picker(&self) -> CompanyPicker {
        CompanyPicker::new(Arc::clone(&self.api), self.config.search_debounce())
    }

    /// A job search over `jobs` using the configured page size.
    pub fn job_search(&self, jobs: Vec<JobSummary>) -> JobSearch {
        JobSearch::new(jobs, self.config.jobs_page_size)
    }
}
