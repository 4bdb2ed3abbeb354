use serde::{Deserialize, Serialize};

use super::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_CANDIDATE")]
    Candidate,
    #[serde(rename = "ROLE_RECRUITER")]
    Recruiter,
    #[serde(other)]
    Other,
}

/// Where the client should land after signing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Dashboard,
    RecruiterDashboard,
    Login,
}

impl Role {
    pub fn landing(self) -> Destination {
        match self {
            Role::Candidate => Destination::Dashboard,
            Role::Recruiter => Destination::RecruiterDashboard,
            Role::Other => Destination::Login,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

/// Which sign-up flow is in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccountKind {
    #[default]
    JobSeeker,
    Recruiter,
}

/// Registration payload. `company` is only sent for recruiters joining an
/// existing company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<EntityId>,
    pub password: String,
}
