//! Company autocomplete: search-as-you-type with a fallback create form.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api_client::JobBoardApi;
use crate::errors::ClientError;
use crate::forms::validation::{email_format, FieldErrors, FieldSpec, FormSchema, FormState};
use crate::lookup::debounce::{CompanyDirectory, DebouncedLookup, LookupUpdate};
use crate::models::company::{Company, CompanyDraft};

pub const CREATE_FAILED: &str = "Failed to create company";
pub const NO_OPEN_FORM: &str = "Open the create form first";

const CREATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::present("companyName", "Company Name"),
    FieldSpec::required("companyEmail", "Company Email", email_format),
    FieldSpec::optional("about", "About"),
    FieldSpec::optional("website", "Website"),
];

fn create_form() -> FormState {
    FormState::new(FormSchema::new(CREATE_FIELDS))
}

fn draft_of(form: &FormState) -> CompanyDraft {
    CompanyDraft {
        company_name: form.text("companyName").to_string(),
        company_email: form.text("companyEmail").to_string(),
        about: form.text("about").to_string(),
        website: form.text("website").to_string(),
    }
}

#[derive(Debug, Clone)]
pub enum PickerState {
    /// No query, or a choice was just made.
    Idle,
    /// A lookup for the current query has answered (possibly with nothing).
    Browsing,
    /// The create form is open. `message` is the last create failure.
    Creating {
        form: FormState,
        message: Option<String>,
    },
}

/// What the picker would hand its parent right now. Exactly one holds.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingSelection {
    None,
    Existing(Company),
    New(CompanyDraft),
}

pub struct CompanyPicker {
    api: Arc<dyn JobBoardApi>,
    lookup: DebouncedLookup<Company>,
    state: PickerState,
    selected: Option<Company>,
}

impl CompanyPicker {
    pub fn new(api: Arc<dyn JobBoardApi>, quiet_period: Duration) -> Self {
        let directory = Arc::new(CompanyDirectory::new(Arc::clone(&api)));
        Self {
            api,
            lookup: DebouncedLookup::new(directory, quiet_period),
            state: PickerState::Idle,
            selected: None,
        }
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn query(&self) -> &str {
        self.lookup.query()
    }

    pub fn candidates(&self) -> &[Company] {
        self.lookup.results()
    }

    pub fn selected(&self) -> Option<&Company> {
        self.selected.as_ref()
    }

    pub fn is_creating(&self) -> bool {
        matches!(self.state, PickerState::Creating { .. })
    }

    pub fn pending_selection(&self) -> PendingSelection {
        match (&self.state, &self.selected) {
            (PickerState::Creating { form, .. }, _) => PendingSelection::New(draft_of(form)),
            (_, Some(company)) => PendingSelection::Existing(company.clone()),
            (_, None) => PendingSelection::None,
        }
    }

    /// A keystroke in the search box. Editing closes an open create form;
    /// clearing the box returns to `Idle`.
    pub fn type_query(&mut self, text: &str) {
        self.lookup.set_query(text);
        if text.trim().is_empty() || self.is_creating() {
            self.state = PickerState::Idle;
        }
    }

    /// Waits for the next lookup answer for the current query and applies it.
    pub async fn next_update(&mut self) -> Option<LookupUpdate> {
        let update = self.lookup.next_update().await?;
        self.on_update(&update);
        Some(update)
    }

    /// Applies lookup answers that have already arrived.
    pub fn pump(&mut self) -> Vec<LookupUpdate> {
        let updates = self.lookup.drain();
        for update in &updates {
            self.on_update(update);
        }
        updates
    }

    fn on_update(&mut self, update: &LookupUpdate) {
        if self.is_creating() {
            return;
        }
        self.state = match update {
            LookupUpdate::Results { .. } => PickerState::Browsing,
            LookupUpdate::Failed { .. } => PickerState::Idle,
        };
    }

    /// Chooses a candidate. Returns it for the parent, echoes its name into
    /// the search box, and closes both the list and any create form.
    pub fn select(&mut self, index: usize) -> Option<Company> {
        let company = self.candidates().get(index).cloned()?;
        self.lookup.set_query_quietly(&company.name);
        self.state = PickerState::Idle;
        self.selected = Some(company.clone());
        info!("Selected company {} ({})", company.name, company.id);
        Some(company)
    }

    /// Opens the create form, seeding the name from the search text. Any
    /// previous selection is dropped.
    pub fn open_create(&mut self) {
        if self.is_creating() {
            return;
        }
        self.selected = None;
        let mut form = create_form();
        let seed = self.lookup.query().trim().to_string();
        if !seed.is_empty() {
            form.set("companyName", seed);
        }
        self.state = PickerState::Creating {
            form,
            message: None,
        };
    }

    pub fn cancel_create(&mut self) {
        if self.is_creating() {
            self.state = PickerState::Idle;
        }
    }

    /// Edits a create-form field and returns its fresh error. No-op unless
    /// the form is open.
    pub fn set_draft_field(&mut self, field: &str, value: &str) -> &str {
        match &mut self.state {
            PickerState::Creating { form, .. } => form.set(field, value),
            _ => "",
        }
    }

    /// Posts the draft. On success the server's entity becomes the selection
    /// exactly as if it had been picked from the list. On failure the form
    /// stays open with its values and an inline message.
    pub async fn submit_create(&mut self) -> Result<Company, ClientError> {
        let draft = match &mut self.state {
            PickerState::Creating { form, message } => {
                *message = None;
                form.validate_for_submit()?;
                draft_of(form)
            }
            _ => {
                let mut errors = FieldErrors::default();
                errors.set("companyName", NO_OPEN_FORM.to_string());
                return Err(ClientError::Validation(errors));
            }
        };

        match self.api.create_company(&draft).await {
            Ok(company) => {
                info!("Created company {} ({})", company.name, company.id);
                self.lookup.set_query_quietly(&company.name);
                self.state = PickerState::Idle;
                self.selected = Some(company.clone());
                Ok(company)
            }
            Err(e) => {
                warn!("Company creation failed: {e}");
                if let PickerState::Creating { message, .. } = &mut self.state {
                    *message = Some(e.server_message().unwrap_or(CREATE_FAILED).to_string());
                }
                Err(e)
            }
        }
    }
}
