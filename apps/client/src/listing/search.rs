use tracing::debug;

use crate::models::job::JobSummary;

/// Free-text search over a fetched job list, paged locally.
///
/// Pages are 1-based. `page` is always within `1..=max(total_pages, 1)`.
#[derive(Debug, Clone)]
pub struct JobSearch {
    jobs: Vec<JobSummary>,
    query: String,
    page: usize,
    page_size: usize,
}

impl JobSearch {
    pub fn new(jobs: Vec<JobSummary>, page_size: usize) -> Self {
        Self {
            jobs,
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replaces the list (e.g. after a refetch) and returns to page 1.
    pub fn set_jobs(&mut self, jobs: Vec<JobSummary>) {
        self.jobs = jobs;
        self.page = 1;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Any change to the query returns to page 1.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Jobs whose title, company or location contains the query,
    /// case-insensitively. An empty query matches everything.
    pub fn matches(&self) -> Vec<&JobSummary> {
        let needle = self.query.to_lowercase();
        self.jobs
            .iter()
            .filter(|job| {
                job.title.to_lowercase().contains(&needle)
                    || job.company.to_lowercase().contains(&needle)
                    || job.location.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.matches().len().div_ceil(self.page_size)
    }

    /// The slice of matches on the current page.
    pub fn page_items(&self) -> Vec<&JobSummary> {
        let start = (self.page - 1) * self.page_size;
        self.matches()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Pagination controls only appear once the matches overflow one page.
    pub fn shows_pagination(&self) -> bool {
        self.matches().len() > self.page_size
    }

    pub fn go_to(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        self.page = page.clamp(1, last);
        debug!("Job search page {} of {last}", self.page);
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }
}
