//! Sign-in / sign-up form

use crate::error::AppResult;
use crate::models::Credentials;
use crate::store::Store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    #[default]
    SignUp,
}

/// Login screen state
#[derive(Clone, Default)]
pub struct LoginForm {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    is_submitting: bool,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        };
        self.error = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Message from the last failed submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn credentials(&self) -> Credentials {
        match self.mode {
            AuthMode::Login => Credentials::login(self.email.trim(), self.password.clone()),
            AuthMode::SignUp => Credentials::signup(
                self.username.trim(),
                self.email.trim(),
                self.password.clone(),
            ),
        }
    }

    /// Submit the credentials. `is_submitting` is cleared whether or not it succeeds.
    pub async fn submit(&mut self, store: &Store) -> AppResult<()> {
        self.is_submitting = true;
        self.error = None;

        let credentials = self.credentials();
        let result = match self.mode {
            AuthMode::Login => store.login(&credentials).await,
            AuthMode::SignUp => store.signup(&credentials).await,
        };

        self.is_submitting = false;
        if let Err(e) = &result {
            tracing::warn!(mode = ?self.mode, error = %e, "Authentication failed");
            self.error = Some(e.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockGateway;
    use crate::router::{Route, Screen};
    use crate::session::MemorySessionStore;
    use std::sync::Arc;

    fn store() -> Store {
        Store::new(
            Arc::new(MockGateway::new()),
            Arc::new(MemorySessionStore::new()),
        )
    }

    #[test]
    fn test_credentials_follow_mode() {
        let mut form = LoginForm::default();
        form.username = " sam ".to_string();
        form.email = "sam@example.com ".to_string();
        form.password = "pw".to_string();

        let creds = form.credentials();
        assert_eq!(creds.username.as_deref(), Some("sam"));
        assert_eq!(creds.email, "sam@example.com");

        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::Login);
        assert_eq!(form.credentials().username, None);
    }

    #[tokio::test]
    async fn test_failed_login_is_surfaced_not_stuck() {
        let store = store();
        let mut form = LoginForm::new(AuthMode::Login);
        form.email = "nobody@example.com".to_string();
        form.password = "pw".to_string();

        assert!(form.submit(&store).await.is_err());
        assert!(!form.is_submitting());
        assert!(form.error().is_some());
        assert!(store.snapshot().current_user.is_none());
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let store = store();
        let mut form = LoginForm::new(AuthMode::SignUp);
        form.username = "sam".to_string();
        form.email = "sam@example.com".to_string();
        form.password = "pw".to_string();

        form.submit(&store).await.unwrap();
        assert!(!form.is_submitting());
        assert_eq!(form.error(), None);
        assert_eq!(store.snapshot().screen(), Screen::Page(Route::Dashboard));

        store.logout();
        form.toggle_mode();
        form.submit(&store).await.unwrap();
        assert_eq!(
            store.snapshot().current_user.map(|u| u.username),
            Some("sam".to_string())
        );
    }
}
