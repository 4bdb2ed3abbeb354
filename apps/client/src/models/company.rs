use serde::{Deserialize, Serialize};

use super::EntityId;

/// A company as the server returns it. Search results carry `name`; the
/// create endpoint echoes `companyName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: EntityId,
    #[serde(alias = "companyName")]
    pub name: String,
    #[serde(default, alias = "companyEmail")]
    pub email: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Locally typed create-company fields, before the server has assigned an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDraft {
    pub company_name: String,
    pub company_email: String,
    pub about: String,
    pub website: String,
}

/// Wire payload for `POST /api/users/addCompany`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub about: &'a str,
    pub website: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub logo_url: &'a str,
    pub company_size: &'a str,
}

impl<'a> From<&'a CompanyDraft> for NewCompany<'a> {
    fn from(draft: &'a CompanyDraft) -> Self {
        Self {
            name: &draft.company_name,
            email: &draft.company_email,
            about: &draft.about,
            website: &draft.website,
            address: "N/A",
            phone: "N/A",
            logo_url: "",
            company_size: "",
        }
    }
}
