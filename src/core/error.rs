//! Login error classification
//!
//! Every failure on the login path is turned into a [`LoginError`] before any
//! user-facing text is produced, so the view never has to guess at the shape
//! of whatever the HTTP layer rejected with.

use serde_json::Value;
use thiserror::Error;

/// Errors produced while logging in
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoginError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}")]
    Http { status: u16, detail: Option<String> },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Could not refresh session: {0}")]
    Session(Box<LoginError>),

    #[error("Not available on the server")]
    Unavailable,
}

impl LoginError {
    /// Build an HTTP error from a status code and the raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        LoginError::Http {
            status,
            detail: extract_detail(body),
        }
    }

    /// Message shown to the user. Never empty.
    pub fn user_message(&self) -> String {
        match self {
            LoginError::MissingField(field) => format!("Please enter your {}.", field),
            LoginError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            LoginError::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            LoginError::Http {
                status,
                detail: None,
            } => status_message(*status),
            LoginError::Decode(_) => "The server sent an unexpected response.".to_string(),
            LoginError::Session(inner) => format!(
                "Logged in, but the session could not be loaded. {}",
                inner.user_message()
            ),
            LoginError::Unavailable => "Login is only available in the browser.".to_string(),
        }
    }
}

fn status_message(status: u16) -> String {
    match status {
        400 | 401 | 403 => "Invalid username or password.".to_string(),
        404 => "Login service not found (404).".to_string(),
        429 => "Too many login attempts. Please wait and try again.".to_string(),
        500..=599 => format!("Server error ({}). Please try again later.", status),
        _ => format!("Login failed ({}).", status),
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Looks at `detail`, then `non_field_errors`, then the first message of any
/// field error list. Non-JSON bodies yield `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    if let Some(detail) = object.get("detail").and_then(Value::as_str) {
        return non_empty(detail);
    }

    if let Some(message) = object.get("non_field_errors").and_then(first_message) {
        return Some(message);
    }

    object.iter().find_map(|(field, errors)| {
        first_message(errors).map(|message| format!("{}: {}", field, message))
    })
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Array(items) => items.iter().find_map(|item| item.as_str().and_then(non_empty)),
        _ => None,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_field() {
        let body = r#"{"detail": "Invalid credentials."}"#;
        assert_eq!(extract_detail(body), Some("Invalid credentials.".to_string()));
    }

    #[test]
    fn test_extract_non_field_errors() {
        let body = r#"{"non_field_errors": ["Unable to log in with provided credentials."]}"#;
        assert_eq!(
            extract_detail(body),
            Some("Unable to log in with provided credentials.".to_string())
        );
    }

    #[test]
    fn test_extract_field_error() {
        let body = r#"{"password": ["This field may not be blank."]}"#;
        assert_eq!(
            extract_detail(body),
            Some("password: This field may not be blank.".to_string())
        );
    }

    #[test]
    fn test_extract_detail_from_non_json() {
        assert_eq!(extract_detail("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_detail(""), None);
    }

    #[test]
    fn test_extract_detail_ignores_blank() {
        assert_eq!(extract_detail(r#"{"detail": "   "}"#), None);
        assert_eq!(extract_detail(r#"[1, 2, 3]"#), None);
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = LoginError::from_response(400, r#"{"detail": "Account disabled."}"#);
        assert_eq!(err.user_message(), "Account disabled.");
    }

    #[test]
    fn test_user_message_falls_back_to_status() {
        let err = LoginError::from_response(400, "");
        assert_eq!(err.user_message(), "Invalid username or password.");

        let err = LoginError::from_response(503, "upstream down");
        assert_eq!(err.user_message(), "Server error (503). Please try again later.");

        let err = LoginError::from_response(418, "");
        assert_eq!(err.user_message(), "Login failed (418).");
    }

    #[test]
    fn test_user_message_never_empty() {
        let errors = [
            LoginError::MissingField("username"),
            LoginError::Network(String::new()),
            LoginError::Http {
                status: 0,
                detail: None,
            },
            LoginError::Decode(String::new()),
            LoginError::Session(Box::new(LoginError::Network(String::new()))),
            LoginError::Unavailable,
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{:?}", err);
        }
    }

    #[test]
    fn test_session_error_wraps_inner_message() {
        let err = LoginError::Session(Box::new(LoginError::from_response(500, "")));
        let message = err.user_message();
        assert!(message.starts_with("Logged in, but the session could not be loaded."));
        assert!(message.contains("Server error (500)"));
    }
}
