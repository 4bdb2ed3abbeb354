use tracing::{debug, info, warn};

use crate::api_client::JobBoardApi;
use crate::errors::ClientError;
use crate::forms::validation::{
    email_format, strong_password, ten_digit_phone, FieldSpec, FormSchema, FormState,
};
use crate::models::auth::{AccountKind, Destination, LoginRequest, Registration};
use crate::models::company::Company;
use crate::models::EntityId;
use crate::session::{Session, SessionStore};

pub const LOGIN_FAILED: &str = "Please check your credentials and try again.";
pub const SIGNUP_FAILED: &str = "Signup failed";

const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("email", "Email", email_format),
    FieldSpec::required("password", "Password", strong_password),
];

const CANDIDATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::present("name", "Name"),
    FieldSpec::required("email", "Email", email_format),
    FieldSpec::required("password", "Password", strong_password),
    FieldSpec::required("phone", "Phone", ten_digit_phone),
];

fn company_selected(value: &serde_json::Value) -> String {
    if crate::forms::validation::is_empty(value) {
        "Please select a company".into()
    } else {
        String::new()
    }
}

fn signup_schema(kind: AccountKind) -> FormSchema {
    let mut fields = CANDIDATE_FIELDS.to_vec();
    if kind == AccountKind::Recruiter {
        fields.push(FieldSpec::required("company", "Company", company_selected));
    }
    FormSchema::new(fields)
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    form: FormState,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            form: FormState::new(FormSchema::new(LOGIN_FIELDS)),
        }
    }

    pub fn set(&mut self, field: &str, value: &str) -> &str {
        self.form.set(field, value)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Signs in and records the session. Returns where the user should land.
    pub async fn submit(
        &mut self,
        api: &dyn JobBoardApi,
        session: &SessionStore,
    ) -> Result<Destination, ClientError> {
        self.form.validate_for_submit()?;

        let request = LoginRequest {
            email: self.form.text("email"),
            password: self.form.text("password"),
        };
        let response = api.login(&request).await.map_err(|e| {
            warn!("Login failed: {e}");
            e
        })?;

        let role = response.role;
        session.sign_in(Session {
            token: response.access_token,
            name: response.name,
            role,
            profile_updated: None,
        });
        Ok(role.landing())
    }
}

/// Candidate or recruiter sign-up. Recruiters must pick an existing company
/// (see `CompanyPicker`).
#[derive(Debug, Clone)]
pub struct SignupForm {
    kind: AccountKind,
    form: FormState,
    company: Option<EntityId>,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self::new(AccountKind::JobSeeker)
    }
}

impl SignupForm {
    pub fn new(kind: AccountKind) -> Self {
        Self {
            kind,
            form: FormState::new(signup_schema(kind)),
            company: None,
        }
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Switches tabs; typed values survive the switch.
    pub fn set_kind(&mut self, kind: AccountKind) {
        if kind == self.kind {
            return;
        }
        self.kind = kind;
        self.form.reshape(signup_schema(kind));
        if kind == AccountKind::JobSeeker {
            self.company = None;
        } else if let Some(id) = &self.company {
            self.form.set("company", id.to_string());
        }
    }

    /// Sets a typed field. The company is not typed: it only enters through
    /// `choose_company`, so direct values for it are ignored.
    pub fn set(&mut self, field: &str, value: &str) -> &str {
        if field == "company" {
            debug!("Ignoring typed company value; a company must be chosen");
            return self.form.errors().get(field);
        }
        self.form.set(field, value)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Records the company chosen (or created) in the picker.
    pub fn choose_company(&mut self, company: &Company) {
        self.company = Some(company.id.clone());
        self.form.set("company", company.id.to_string());
    }

    pub fn registration(&self) -> Registration {
        Registration {
            name: self.form.text("name").to_string(),
            email: self.form.text("email").to_string(),
            phone: self.form.text("phone").to_string(),
            company: match self.kind {
                AccountKind::Recruiter => self.company.clone(),
                AccountKind::JobSeeker => None,
            },
            password: self.form.text("password").to_string(),
        }
    }

    /// Registers the account. On success the user is sent to sign in.
    pub async fn submit(&mut self, api: &dyn JobBoardApi) -> Result<Destination, ClientError> {
        self.form.validate_for_submit()?;
        let registration = self.registration();
        api.register(self.kind, &registration).await.map_err(|e| {
            warn!("Signup failed: {e}");
            e
        })?;
        info!("Registered {:?} account for {}", self.kind, registration.email);
        Ok(Destination::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::fake::{company, FakeApi};
    use crate::models::auth::Role;
    use crate::session::CredentialProvider;

    #[tokio::test]
    async fn test_login_routes_by_role_and_stores_token() {
        let api = FakeApi::new();
        let session = SessionStore::new();
        let mut form = LoginForm::new();
        form.set("email", "recruiter@acme.io");
        form.set("password", "Secret1!");
        let dest = form.submit(&api, &session).await.unwrap();
        assert_eq!(dest, Destination::RecruiterDashboard);
        assert_eq!(session.bearer_token().as_deref(), Some("token-123"));
        assert_eq!(session.current().unwrap().role, Role::Recruiter);
    }

    #[tokio::test]
    async fn test_login_blocked_by_invalid_email() {
        let api = FakeApi::new();
        let session = SessionStore::new();
        let mut form = LoginForm::new();
        assert_eq!(form.set("email", "ann"), "Invalid email format");
        form.set("password", "Secret1!");
        assert!(form.submit(&api, &session).await.unwrap_err().is_validation());
        assert!(api.calls().is_empty());
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_session_empty() {
        let api = FakeApi::new();
        api.reject_with(401, None);
        let session = SessionStore::new();
        let mut form = LoginForm::new();
        form.set("email", "ann@example.com");
        form.set("password", "Secret1!");
        let err = form.submit(&api, &session).await.unwrap_err();
        assert_eq!(err.notice("Login Error", LOGIN_FAILED).description, LOGIN_FAILED);
        assert!(!session.is_signed_in());
    }

    fn filled(kind: AccountKind) -> SignupForm {
        let mut form = SignupForm::new(kind);
        form.set("name", "Ann");
        form.set("email", "ann@example.com");
        form.set("password", "Secret1!");
        form.set("phone", "0123456789");
        form
    }

    #[tokio::test]
    async fn test_recruiter_needs_a_company() {
        let api = FakeApi::new();
        let mut form = filled(AccountKind::Recruiter);
        assert!(form.submit(&api).await.unwrap_err().is_validation());
        assert_eq!(form.form().errors().get("company"), "Please select a company");

        form.choose_company(&company(7, "Acme Corp"));
        assert_eq!(form.submit(&api).await.unwrap(), Destination::Login);
        assert_eq!(api.calls(), vec!["register:Recruiter:ann@example.com"]);
        assert_eq!(form.registration().company, Some(EntityId::Number(7)));
    }

    #[tokio::test]
    async fn test_typed_company_value_does_not_count_as_chosen() {
        let api = FakeApi::new();
        let mut form = filled(AccountKind::Recruiter);
        form.set("company", "7");
        assert_eq!(form.form().text("company"), "");

        assert!(form.submit(&api).await.unwrap_err().is_validation());
        assert_eq!(form.form().errors().get("company"), "Please select a company");
        assert_eq!(form.registration().company, None);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_candidate_signup_skips_company() {
        let api = FakeApi::new();
        let mut form = filled(AccountKind::Recruiter);
        form.set_kind(AccountKind::JobSeeker);
        assert_eq!(form.form().text("email"), "ann@example.com");
        assert_eq!(form.submit(&api).await.unwrap(), Destination::Login);
        assert_eq!(form.registration().company, None);
    }

    #[tokio::test]
    async fn test_bad_phone_blocks_signup() {
        let api = FakeApi::new();
        let mut form = filled(AccountKind::JobSeeker);
        assert_eq!(form.set("phone", "12345"), "Phone must be 10 digits");
        assert!(form.submit(&api).await.is_err());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_signup_rejection_surfaces_server_message() {
        let api = FakeApi::new();
        api.reject_with(409, Some("Email already registered"));
        let mut form = filled(AccountKind::JobSeeker);
        let err = form.submit(&api).await.unwrap_err();
        assert_eq!(
            err.notice("Signup Error", SIGNUP_FAILED).description,
            "Email already registered"
        );
    }
}
