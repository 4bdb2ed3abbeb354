// Job listings and application boards: local search, filtering and paging
// over lists fetched once, plus the per-row actions.

pub mod applications;
pub mod filters;
pub mod job_card;
pub mod search;

pub use applications::{ApplicationBoard, CandidateApplications, RecruiterOverview};
pub use filters::{Filter, JobFilters};
pub use job_card::{JobCard, JobDetailsView};
pub use search::JobSearch;
