use serde::Deserialize;
use thiserror::Error;

use crate::forms::validation::FieldErrors;
use crate::notice::Notice;

pub const VALIDATION_MESSAGE: &str = "Please fix the errors before submitting";

/// Client-level error type.
///
/// Three families matter to callers:
/// - `Validation` is local and field-scoped; nothing was sent.
/// - `Http` / `Parse` are transport failures.
/// - `Api` is a request the server rejected, with its message when it sent one.
///
/// Authorization failures arrive as `Api { status: 401 | 403, .. }` like any other rejection.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Profile update required")]
    ProfileIncomplete,

    #[error("Posting is not accepting applications")]
    PostingClosed,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl ClientError {
    /// Builds an `Api` error from a non-success response body, pulling
    /// `{"message": "..."}` out of it when the server sent one.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        ClientError::Api { status, message }
    }

    /// The message the server attached to a rejected write, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// Maps the error onto a user-facing notice. `fallback` is shown for
    /// transport failures and for rejections that carried no message.
    pub fn notice(&self, title: &str, fallback: &str) -> Notice {
        match self {
            ClientError::Validation(_) => Notice::error("Validation Error", VALIDATION_MESSAGE),
            ClientError::NotAuthenticated => Notice::error(
                "Authentication Required",
                "Please log in to continue.",
            ),
            ClientError::ProfileIncomplete => Notice::error(
                "Profile Update Required",
                "Please update your profile to apply for this job.",
            ),
            ClientError::PostingClosed => Notice::error(
                "Applications Closed",
                "This job is no longer accepting applications.",
            ),
            ClientError::Api { .. } => Notice::error(title, self.server_message().unwrap_or(fallback)),
            ClientError::Http(e) => {
                tracing::error!("HTTP error: {e}");
                Notice::error(title, fallback)
            }
            ClientError::Parse(e) => {
                tracing::error!("Response parse error: {e}");
                Notice::error(title, fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_extracted_from_body() {
        let err = ClientError::from_response_body(409, r#"{"message":"Company already exists"}"#);
        assert_eq!(err.server_message(), Some("Company already exists"));
        let notice = err.notice("Error", "Failed to create company");
        assert_eq!(notice.description, "Company already exists");
    }

    #[test]
    fn test_fallback_when_body_has_no_message() {
        let err = ClientError::from_response_body(500, "<html>oops</html>");
        assert_eq!(err.server_message(), None);
        let notice = err.notice("Error", "Something went wrong.");
        assert_eq!(notice.description, "Something went wrong.");
        assert!(notice.is_error());
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let err = ClientError::from_response_body(400, r#"{"message":"  "}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_validation_notice_is_generic() {
        let err = ClientError::Validation(FieldErrors::default());
        assert_eq!(err.notice("Login Error", "x").description, VALIDATION_MESSAGE);
    }
}
