//! Session state machine - pure domain logic.
//!
//! Holds the current token and user and the transitions the auth layer
//! drives. No DOM or storage access here; `auth.rs` wires these transitions
//! to the token store and the Leptos context.

/// Minimal identity record kept alongside the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub name: String,
    pub username: String,
}

/// Client-held authentication state.
///
/// `is_loading` is true from startup until `restore` has run, which is what
/// keeps the route guard in its "unknown" state during hydration.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<SessionUser>,
    pub is_loading: bool,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
            error: None,
        }
    }

    /// Adopts a token read back from persistent storage.
    ///
    /// The token is trusted as-is: no expiry check, no server round-trip.
    /// A stale or revoked token stays accepted until the first 401 forces a
    /// logout. Absence of a stored token means unauthenticated.
    pub fn restore(&mut self, stored: Option<String>) {
        self.token = stored;
        self.is_loading = false;
    }

    pub fn login_succeeded(&mut self, token: String, username: &str) {
        self.token = Some(token);
        self.user = Some(SessionUser {
            name: username.to_string(),
            username: username.to_string(),
        });
        self.error = None;
        self.is_loading = false;
    }

    /// A failed login always leaves the session unauthenticated, whatever
    /// state it was in before.
    pub fn login_failed(&mut self, message: String) {
        self.token = None;
        self.user = None;
        self.error = Some(message);
        self.is_loading = false;
    }

    /// Logout and forced logout (401). Idempotent.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.error = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_and_unauthenticated() {
        let session = Session::new();
        assert!(session.is_loading);
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn failed_logins_never_leave_a_token_behind() {
        let mut session = Session::new();
        for attempt in 0..3 {
            session.login_failed(format!("attempt {attempt} rejected"));
            assert_eq!(session.token(), None);
            assert_eq!(session.user(), None);
            assert!(!session.is_authenticated());
            assert!(session.error().is_some());
        }
    }

    #[test]
    fn failure_after_success_clears_the_previous_token() {
        let mut session = Session::new();
        session.login_succeeded("fake-token".to_string(), "testuser");
        session.login_failed("credentials rejected".to_string());
        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn successful_login_sets_token_user_and_clears_error() {
        let mut session = Session::new();
        session.login_failed("first try failed".to_string());
        session.login_succeeded("fake-token".to_string(), "testuser");

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("fake-token"));
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("testuser"));
        assert_eq!(session.error(), None);
    }

    #[test]
    fn restore_trusts_a_persisted_token_without_any_call() {
        let mut session = Session::new();
        session.restore(Some("fake-token".to_string()));
        assert!(!session.is_loading);
        assert!(session.is_authenticated());
    }

    #[test]
    fn restore_without_a_stored_token_is_unauthenticated() {
        let mut session = Session::new();
        session.restore(None);
        assert!(!session.is_loading);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut session = Session::new();
        session.login_succeeded("fake-token".to_string(), "testuser");
        session.clear();
        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
        assert_eq!(session.error(), None);
    }
}
