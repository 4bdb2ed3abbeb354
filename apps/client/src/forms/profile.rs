use serde_json::{json, Value};
use tracing::{info, warn};

use crate::api_client::JobBoardApi;
use crate::errors::ClientError;
use crate::forms::diff::{diff, FormSnapshot, Patch};
use crate::forms::validation::{
    is_valid_email, optional_number, FieldKind, FieldSpec, FormSchema, FormState,
};
use crate::models::profile::ResumeAttachment;
use crate::notice::Notice;
use crate::session::SessionStore;

pub const LOAD_FAILED: &str = "Could not load profile.";
pub const SAVE_FAILED: &str = "Failed to update profile.";

fn min_chars(value: &Value, n: usize) -> bool {
    value.as_str().is_some_and(|s| s.chars().count() >= n)
}

fn name_rule(value: &Value) -> String {
    if min_chars(value, 2) {
        String::new()
    } else {
        "Name must be at least 2 characters".into()
    }
}

fn email_rule(value: &Value) -> String {
    if value.as_str().is_some_and(is_valid_email) {
        String::new()
    } else {
        "Invalid email address".into()
    }
}

fn phone_rule(value: &Value) -> String {
    if min_chars(value, 10) {
        String::new()
    } else {
        "Phone must be at least 10 digits".into()
    }
}

fn skills_rule(value: &Value) -> String {
    if value.as_array().is_some_and(|a| !a.is_empty()) {
        String::new()
    } else {
        "At least one skill is required".into()
    }
}

fn location_rule(value: &Value) -> String {
    if min_chars(value, 2) {
        String::new()
    } else {
        "Location is required".into()
    }
}

const PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Full Name", name_rule),
    FieldSpec::required("email", "Email", email_rule),
    FieldSpec::required("phone", "Phone", phone_rule),
    FieldSpec::required("skills", "Skills", skills_rule).of_kind(FieldKind::List),
    FieldSpec::required("location", "Location", location_rule),
    FieldSpec::optional("experience", "Experience")
        .of_kind(FieldKind::Number)
        .checked(optional_number),
    FieldSpec::optional("resumeUrl", "Resume URL"),
];

/// What a save attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Nothing differed from the snapshot and no file was staged; no request was made.
    NoChanges(Notice),
    Saved { patch: Patch, notice: Notice },
}

/// The edit-profile page: form values, the last-saved snapshot, and an
/// optionally staged resume.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    form: FormState,
    snapshot: FormSnapshot,
    attachment: Option<ResumeAttachment>,
}

impl Default for ProfileEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileEditor {
    pub fn new() -> Self {
        Self {
            form: FormState::new(FormSchema::new(PROFILE_FIELDS)),
            snapshot: FormSnapshot::default(),
            attachment: None,
        }
    }

    /// Fetches the profile, fills the form, and takes the diff baseline.
    /// On failure the editor is left as it was.
    pub async fn load(&mut self, api: &dyn JobBoardApi) -> Result<(), ClientError> {
        let profile = api.fetch_profile().await.map_err(|e| {
            warn!("Profile load failed: {e}");
            e
        })?;
        let values = profile.to_form_values();
        self.form.reset(values.clone());
        self.snapshot = FormSnapshot::new(values);
        info!("Profile loaded");
        Ok(())
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn attachment(&self) -> Option<&ResumeAttachment> {
        self.attachment.as_ref()
    }

    /// Sets a text field and returns its fresh error message.
    pub fn set_field(&mut self, field: &str, value: &str) -> &str {
        self.form.set(field, value)
    }

    /// Blank input clears the value; a finite number is stored as a number;
    /// anything else (including NaN and infinities) is kept as typed so the
    /// validator can flag it.
    pub fn set_experience(&mut self, raw: &str) -> &str {
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            Value::Null
        } else {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|n| json!(n))
                .unwrap_or_else(|| Value::String(raw.to_string()))
        };
        self.form.set("experience", value)
    }

    pub fn skills(&self) -> Vec<String> {
        self.form
            .value("skills")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Adds a trimmed skill. Blank and duplicate entries are ignored; returns
    /// whether the list changed.
    pub fn add_skill(&mut self, raw: &str) -> bool {
        let skill = raw.trim();
        let mut skills = self.skills();
        if skill.is_empty() || skills.iter().any(|s| s == skill) {
            return false;
        }
        skills.push(skill.to_string());
        self.form.set("skills", json!(skills));
        true
    }

    pub fn remove_skill(&mut self, skill: &str) {
        let skills: Vec<String> = self.skills().into_iter().filter(|s| s != skill).collect();
        self.form.set("skills", json!(skills));
    }

    pub fn stage_resume(&mut self, attachment: ResumeAttachment) {
        self.attachment = Some(attachment);
    }

    /// The patch a save would send right now.
    pub fn pending_patch(&self) -> Patch {
        diff(self.form.values(), &self.snapshot)
    }

    /// Validates, diffs against the snapshot, and sends only the changed
    /// fields. On any failure the editor and snapshot are unchanged.
    pub async fn submit(
        &mut self,
        api: &dyn JobBoardApi,
        session: &SessionStore,
    ) -> Result<SaveOutcome, ClientError> {
        self.form.validate_for_submit()?;

        let patch = self.pending_patch();
        if patch.is_empty() && self.attachment.is_none() {
            return Ok(SaveOutcome::NoChanges(Notice::info(
                "No Changes",
                "No updates detected in your profile.",
            )));
        }

        info!(
            "Saving profile: fields={:?} resume={}",
            patch.keys().collect::<Vec<_>>(),
            self.attachment.is_some()
        );
        api.update_profile(&patch, self.attachment.as_ref())
            .await
            .map_err(|e| {
                warn!("Profile update failed: {e}");
                e
            })?;

        self.snapshot = self.snapshot.merged(&patch);
        self.attachment = None;
        session.set_profile_updated(true);

        Ok(SaveOutcome::Saved {
            patch,
            notice: Notice::success(
                "Profile Updated",
                "Your profile has been successfully updated.",
            ),
        })
    }
}
