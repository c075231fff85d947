//! Session payload returned by the backend

use serde::{Deserialize, Serialize};

/// The signed-in user, as far as the UI cares
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display: Option<String>,
}

/// Current session state
///
/// Every field defaults so that payloads with extra or missing keys decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
    /// URLs of alternate login backends (SSO etc.)
    #[serde(default)]
    pub backends: Vec<String>,
}

impl SessionInfo {
    pub fn is_authenticated(&self) -> bool {
        self.logged_in && self.user.is_some()
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        match user.display.as_deref() {
            Some(display) if !display.is_empty() => Some(display),
            _ => Some(user.username.as_str()),
        }
    }
}

/// Label for an alternate login backend link
pub fn backend_label(backend: &str) -> String {
    format!("Login with {}", backend)
}
