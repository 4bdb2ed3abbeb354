use serde_json::{json, Value};
use tracing::{info, warn};

use crate::api_client::JobBoardApi;
use crate::errors::ClientError;
use crate::forms::validation::{optional_number, FieldKind, FieldSpec, FormSchema, FormState};
use crate::models::job::NewJob;
use crate::notice::Notice;

pub const CREATE_FAILED: &str = "Something went wrong.";

const JOB_FIELDS: &[FieldSpec] = &[
    FieldSpec::present("title", "Job Title"),
    FieldSpec::present("description", "Description"),
    FieldSpec::present("company", "Company"),
    FieldSpec::present("city", "City"),
    FieldSpec::optional("skills", "Skills").of_kind(FieldKind::List),
    FieldSpec::optional("experience", "Experience").checked(optional_number),
    FieldSpec::optional("salary", "Salary"),
];

/// The recruiter's "Create New Job Posting" form.
#[derive(Debug, Clone)]
pub struct JobPostingForm {
    form: FormState,
    skill_input: String,
}

impl Default for JobPostingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl JobPostingForm {
    pub fn new() -> Self {
        Self {
            form: FormState::new(FormSchema::new(JOB_FIELDS)),
            skill_input: String::new(),
        }
    }

    pub fn set(&mut self, field: &str, value: &str) -> &str {
        self.form.set(field, value)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn skills(&self) -> Vec<String> {
        self.form
            .value("skills")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn set_skill_input(&mut self, raw: &str) {
        self.skill_input = raw.to_string();
    }

    pub fn skill_input(&self) -> &str {
        &self.skill_input
    }

    /// Commits the pending skill text (Enter or comma in the UI). The input
    /// is cleared whether or not the skill was new.
    pub fn commit_skill(&mut self) {
        let skill = self.skill_input.trim().to_string();
        self.skill_input.clear();
        let mut skills = self.skills();
        if !skill.is_empty() && !skills.contains(&skill) {
            skills.push(skill);
            self.form.set("skills", json!(skills));
        }
    }

    pub fn remove_skill(&mut self, skill: &str) {
        let skills: Vec<String> = self.skills().into_iter().filter(|s| s != skill).collect();
        self.form.set("skills", json!(skills));
    }

    /// The payload as it would be posted. Experience defaults to 0.
    pub fn payload(&self) -> NewJob {
        let experience = self
            .form
            .text("experience")
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0);
        NewJob {
            title: self.form.text("title").to_string(),
            description: self.form.text("description").to_string(),
            company: self.form.text("company").to_string(),
            city: self.form.text("city").to_string(),
            skills: self.skills(),
            experience,
            salary: self.form.text("salary").to_string(),
        }
    }

    /// Posts the job; the form is cleared only after the server accepts it.
    pub async fn submit(&mut self, api: &dyn JobBoardApi) -> Result<Notice, ClientError> {
        self.form.validate_for_submit()?;
        let job = self.payload();
        api.create_job(&job).await.map_err(|e| {
            warn!("Job creation failed: {e}");
            e
        })?;
        info!("Created job posting '{}'", job.title);
        self.form.clear();
        self.skill_input.clear();
        Ok(Notice::success("Success!", "Job posting created successfully."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::fake::FakeApi;

    fn filled() -> JobPostingForm {
        let mut form = JobPostingForm::new();
        form.set("title", "Rust Engineer");
        form.set("description", "Own the ingest pipeline");
        form.set("company", "Acme");
        form.set("city", "Remote");
        form
    }

    #[tokio::test]
    async fn test_missing_required_fields_block_post() {
        let api = FakeApi::new();
        let mut form = JobPostingForm::new();
        form.set("title", "Rust Engineer");
        assert!(form.submit(&api).await.unwrap_err().is_validation());
        assert_eq!(form.form().errors().get("city"), "City is required");
        assert!(api.created_jobs().is_empty());
    }

    #[tokio::test]
    async fn test_successful_post_resets_form() {
        let api = FakeApi::new();
        let mut form = filled();
        form.set_skill_input(" Rust ");
        form.commit_skill();
        form.set_skill_input("Rust");
        form.commit_skill();
        form.set_skill_input("Kafka");
        form.commit_skill();
        form.set("experience", "3");

        let notice = form.submit(&api).await.unwrap();
        assert_eq!(notice.title, "Success!");
        let posted = &api.created_jobs()[0];
        assert_eq!(posted.skills, vec!["Rust", "Kafka"]);
        assert_eq!(posted.experience, 3.0);
        assert_eq!(form.form().text("title"), "");
        assert!(form.skills().is_empty());
    }

    #[tokio::test]
    async fn test_failed_post_keeps_values() {
        let api = FakeApi::new();
        api.reject_with(400, Some("Salary must be a range"));
        let mut form = filled();
        let err = form.submit(&api).await.unwrap_err();
        assert_eq!(
            err.notice("Error", CREATE_FAILED).description,
            "Salary must be a range"
        );
        assert_eq!(form.form().text("title"), "Rust Engineer");
    }

    #[test]
    fn test_experience_defaults_to_zero() {
        let form = filled();
        assert_eq!(form.payload().experience, 0.0);
    }

    #[test]
    fn test_remove_skill() {
        let mut form = filled();
        form.set_skill_input("Go");
        form.commit_skill();
        form.remove_skill("Go");
        assert!(form.skills().is_empty());
        assert_eq!(form.skill_input(), "");
    }
}
