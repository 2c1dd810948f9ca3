use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The server-provided message if there is one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        )
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error accessing session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize session file: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::Status {
            status: StatusCode::CONFLICT,
            message: Some("Username already exists".to_string()),
        };
        assert_eq!(err.user_message("Registration failed"), "Username already exists");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn missing_or_empty_message_uses_fallback() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");

        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: Some(String::new()),
        };
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");

        let err = ApiError::Decode("missing field `token`".to_string());
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn detects_expired_tokens() {
        let err = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: Some("Token is invalid!".to_string()),
        };
        assert!(err.is_unauthorized());
    }
}
