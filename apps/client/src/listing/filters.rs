use std::fmt;

use crate::models::job::JobSummary;

/// One dropdown: everything, or exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(String),
}

impl Filter {
    /// A missing attribute only passes `All`.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<&str> for Filter {
    /// `"all"` (any case) is the catch-all option.
    fn from(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            Filter::All
        } else {
            Filter::Only(raw.to_string())
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(v) => f.write_str(v),
        }
    }
}

/// Category / location / experience filters over the "All Available Jobs" list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    pub category: Filter,
    pub location: Filter,
    pub experience: Filter,
}

impl JobFilters {
    pub fn admits(&self, job: &JobSummary) -> bool {
        self.category.admits(job.category.as_deref())
            && self.location.admits(Some(job.location.as_str()))
            && self.experience.admits(job.experience.as_deref())
    }

    pub fn apply<'a>(&self, jobs: &'a [JobSummary]) -> Vec<&'a JobSummary> {
        jobs.iter().filter(|job| self.admits(job)).collect()
    }
}
