//! Login credentials read from the form

use serde::Serialize;

use super::error::LoginError;

/// Username and password exactly as typed into the login form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from raw form values.
    ///
    /// Values are taken verbatim (no trimming). Both fields are required.
    pub fn from_form(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, LoginError> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() {
            return Err(LoginError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(LoginError::MissingField("password"));
        }

        Ok(Self { username, password })
    }
}
