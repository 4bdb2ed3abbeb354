use std::sync::{Mutex, MutexGuard};

use crate::models::auth::Role;

/// Supplies the bearer credential attached to API calls. Injected into the
/// HTTP client at construction so tests can hand it a fake.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub name: Option<String>,
    pub role: Role,
    /// `Some(false)` means the server asked for a profile update before the
    /// candidate may apply; `None` means nobody has said either way.
    pub profile_updated: Option<bool>,
}

/// In-process session holder. Replaces the browser local-storage keys
/// (`token`, `name`, `profileUpdate`).
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        // A panic while holding the lock cannot leave a half-written session.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn sign_in(&self, session: Session) {
        tracing::info!("Signed in as {:?} ({:?})", session.name, session.role);
        *self.lock() = Some(session);
    }

    pub fn sign_out(&self) {
        *self.lock() = None;
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.lock().is_some()
    }

    pub fn set_profile_updated(&self, updated: bool) {
        if let Some(session) = self.lock().as_mut() {
            session.profile_updated = Some(updated);
        }
    }

    /// True only when the session explicitly records a pending profile update.
    pub fn needs_profile_update(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|s| s.profile_updated == Some(false))
    }
}

impl CredentialProvider for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.lock().as_ref().map(|s| s.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "tok".into(),
            name: Some("Ann".into()),
            role: Role::Candidate,
            profile_updated: None,
        }
    }

    #[test]
    fn test_token_follows_sign_in_and_out() {
        let store = SessionStore::new();
        assert_eq!(store.bearer_token(), None);
        store.sign_in(session());
        assert_eq!(store.bearer_token().as_deref(), Some("tok"));
        store.sign_out();
        assert!(!store.is_signed_in());
    }

    #[test]
    fn test_profile_update_flag() {
        let store = SessionStore::with_session(session());
        assert!(!store.needs_profile_update());
        store.set_profile_updated(false);
        assert!(store.needs_profile_update());
        store.set_profile_updated(true);
        assert!(!store.needs_profile_update());
    }
}
