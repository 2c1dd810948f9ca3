use tracing::{info, warn};

use crate::error::ApiError;
use crate::models::{Credentials, ServerStatus};
use crate::worker::Job;

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const REGISTERED: &str = "Registration successful! Please log in.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

pub struct AuthView {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    pending: bool,
    error: Option<String>,
    notice: Option<String>,
    server_status: Option<Result<String, String>>,
}

impl AuthView {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            password: String::new(),
            pending: false,
            error: None,
            notice: None,
            server_status: None,
        }
    }

    /// Switches between login and register. Typed fields are kept.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
    }

    pub fn can_submit(&self) -> bool {
        !self.pending && !self.username.trim().is_empty() && !self.password.is_empty()
    }

    /// Returns the job to run, or `None` while a request is still out.
    pub fn submit(&mut self) -> Option<Job> {
        if !self.can_submit() {
            return None;
        }
        self.pending = true;
        self.error = None;
        self.notice = None;

        let credentials = Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        };
        Some(match self.mode {
            AuthMode::Login => Job::Login(credentials),
            AuthMode::Register => Job::Register(credentials),
        })
    }

    /// Yields the token to hand to the session store on success.
    pub fn finish_login(&mut self, result: Result<String, ApiError>) -> Option<String> {
        self.pending = false;
        match result {
            Ok(token) => {
                info!(username = %self.username, "Logged in");
                self.password.clear();
                Some(token)
            }
            Err(e) => {
                warn!("Login failed: {e}");
                self.error = Some(e.user_message(LOGIN_FAILED));
                None
            }
        }
    }

    /// Registration never starts a session; it sends the user to log in.
    pub fn finish_register(&mut self, result: Result<Option<String>, ApiError>) {
        self.pending = false;
        match result {
            Ok(_) => {
                info!(username = %self.username, "Registered");
                self.mode = AuthMode::Login;
                self.notice = Some(REGISTERED.to_string());
            }
            Err(e) => {
                warn!("Registration failed: {e}");
                self.error = Some(e.user_message(REGISTER_FAILED));
            }
        }
    }

    pub fn session_expired(&mut self, message: String) {
        self.pending = false;
        self.notice = None;
        self.error = Some(message);
    }

    pub fn set_server_status(&mut self, result: Result<ServerStatus, ApiError>) {
        self.server_status = Some(match result {
            Ok(status) => Ok(status.message.unwrap_or(status.status)),
            Err(e) => Err(e.to_string()),
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn server_status(&self) -> Option<&Result<String, String>> {
        self.server_status.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    fn filled(mode: AuthMode) -> AuthView {
        AuthView {
            mode,
            username: "jackson".to_string(),
            password: "hunter2".to_string(),
            ..AuthView::new()
        }
    }

    #[test]
    fn pending_request_blocks_a_second_submit() {
        let mut view = filled(AuthMode::Login);
        assert!(matches!(view.submit(), Some(Job::Login(_))));
        assert!(view.is_pending());
        assert!(view.submit().is_none());

        view.finish_login(Ok("abc123".to_string()));
        assert!(!view.is_pending());
    }

    #[test]
    fn login_success_yields_the_token() {
        let mut view = filled(AuthMode::Login);
        view.submit();
        assert_eq!(view.finish_login(Ok("abc123".to_string())), Some("abc123".to_string()));
        assert_eq!(view.error(), None);
    }

    #[test]
    fn login_failure_shows_server_message_or_fallback() {
        let mut view = filled(AuthMode::Login);
        view.submit();
        let token = view.finish_login(Err(ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: Some("Wrong password".to_string()),
        }));
        assert_eq!(token, None);
        assert_eq!(view.error(), Some("Wrong password"));

        view.submit();
        view.finish_login(Err(ApiError::Decode("eof".to_string())));
        assert_eq!(view.error(), Some(LOGIN_FAILED));
    }

    #[test]
    fn register_success_switches_to_login_without_a_session() {
        let mut view = filled(AuthMode::Register);
        assert!(matches!(view.submit(), Some(Job::Register(_))));
        view.finish_register(Ok(Some("New user created!".to_string())));

        assert_eq!(view.mode, AuthMode::Login);
        assert_eq!(view.notice(), Some(REGISTERED));
        assert_eq!(view.username, "jackson");
    }

    #[test]
    fn register_failure_keeps_register_mode() {
        let mut view = filled(AuthMode::Register);
        view.submit();
        view.finish_register(Err(ApiError::Status {
            status: StatusCode::CONFLICT,
            message: Some("Username already exists".to_string()),
        }));
        assert_eq!(view.mode, AuthMode::Register);
        assert_eq!(view.error(), Some("Username already exists"));
    }

    #[test]
    fn toggling_mode_keeps_fields() {
        let mut view = filled(AuthMode::Login);
        view.toggle_mode();
        assert_eq!(view.mode, AuthMode::Register);
        assert_eq!(view.username, "jackson");
        assert_eq!(view.password, "hunter2");
        view.toggle_mode();
        assert_eq!(view.mode, AuthMode::Login);
    }

    #[test]
    fn empty_credentials_are_not_sent() {
        let mut view = AuthView::new();
        assert!(view.submit().is_none());
        assert!(!view.is_pending());
    }
}
