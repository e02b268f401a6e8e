use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// Rejected locally before any request was issued.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    AuthRequired(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Http { status: u16, message: Option<String> },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Message suitable for the user: local validation text and backend-supplied
    /// messages are passed through verbatim, everything else collapses to `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(message) | AppError::AuthRequired(message) => message.clone(),
            AppError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn user_message_prefers_backend_message() {
        let err = AppError::Http {
            status: 400,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message("Registration failed"), "Email already registered");
    }

    #[test]
    fn user_message_falls_back_without_details() {
        let err = AppError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Registration failed"), "Registration failed");

        let err = AppError::Network("connection refused".to_string());
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn validation_errors_are_verbatim() {
        let err = AppError::Validation("Passwords don't match".to_string());
        assert!(err.is_validation());
        assert_eq!(err.user_message("Registration failed"), "Passwords don't match");
        assert_eq!(err.to_string(), "Passwords don't match");
    }

    #[test]
    fn display_includes_status() {
        let err = AppError::Http {
            status: 404,
            message: Some("Job not found".to_string()),
        };
        assert_eq!(err.to_string(), "Request failed (404): Job not found");
        assert_eq!(err.status(), Some(404));
    }
}
