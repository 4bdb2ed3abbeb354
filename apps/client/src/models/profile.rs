use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The profile as `GET /api/users/me/profile` returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    /// The server spells this field `experince`.
    #[serde(default, rename = "experince", alias = "experience")]
    pub experience: Option<f64>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl UserProfile {
    /// Maps the wire shape onto the edit-profile form fields. Missing text
    /// fields become empty strings, a missing experience stays null.
    pub fn to_form_values(&self) -> Map<String, Value> {
        let text = |v: &Option<String>| Value::String(v.clone().unwrap_or_default());
        let mut values = Map::new();
        values.insert("name".into(), text(&self.user_name));
        values.insert("email".into(), text(&self.email));
        values.insert("phone".into(), text(&self.phone));
        values.insert("skills".into(), json!(self.skills.clone().unwrap_or_default()));
        values.insert("location".into(), text(&self.location));
        values.insert(
            "experience".into(),
            self.experience.map(|e| json!(e)).unwrap_or(Value::Null),
        );
        values.insert("resumeUrl".into(), text(&self.resume_url));
        values
    }
}

/// A resume file staged for upload alongside the next profile save.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeAttachment {
    pub file_name: String,
    pub content: Bytes,
}

impl ResumeAttachment {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}
